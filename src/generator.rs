// 🎲 Exercise generator - extra batches and the random daily exercise
//
// Producers of well-formed exercise records. Everything generated here must
// pass `Exercise::validate` against the standard chart.

use crate::catalog::{Difficulty, Exercise};
use crate::entry::{Entry, JournalLine};
use rand::Rng;

pub const TEA_STAND: &str = "Greenleaf Tea Stand";
pub const WORKSHOP: &str = "Greenleaf Workshop";
pub const ONLINE_SHOP: &str = "Greenleaf Online";

/// Second batch of beginner exercises for the tea stand.
pub fn seed_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            id: "Q5".to_string(),
            title: "Tea stand: utilities paid in cash".to_string(),
            shop: TEA_STAND.to_string(),
            difficulty: Difficulty::Beginner,
            points: 45,
            voucher: "[Voucher] Utility bill receipt\nPaid this month's utilities of 1,500 in cash."
                .to_string(),
            objective: "An expense increases and cash decreases.".to_string(),
            hints: vec![
                "Expenses usually increase on the debit side.".to_string(),
                "Cash flowing out is a credit to Cash.".to_string(),
            ],
            answer: Entry::new(vec![
                JournalLine::debit("Utilities Expense", 1500),
                JournalLine::credit("Cash", 1500),
            ]),
        },
        Exercise {
            id: "Q6".to_string(),
            title: "Tea stand: pay the supplier".to_string(),
            shop: TEA_STAND.to_string(),
            difficulty: Difficulty::Beginner,
            points: 55,
            voucher: "[Voucher] Bank transfer record\nPaid last month's 8,000 ingredient purchase."
                .to_string(),
            objective: "Settle the payable. Which side does a liability decrease go on?"
                .to_string(),
            hints: vec![
                "A liability decrease is usually recorded as a debit.".to_string(),
                "Cash flowing out is a credit to Cash.".to_string(),
            ],
            answer: Entry::new(vec![
                JournalLine::debit("Accounts Payable", 8000),
                JournalLine::credit("Cash", 8000),
            ]),
        },
    ]
}

struct DailyTemplate {
    title: &'static str,
    shop: &'static str,
    points: u32,
    voucher: &'static str,
    objective: &'static str,
    debit: (&'static str, u64),
    credit: (&'static str, u64),
    hints: [&'static str; 2],
}

const DAILY_TEMPLATES: [DailyTemplate; 2] = [
    DailyTemplate {
        title: "Online shop: service fee received in cash",
        shop: ONLINE_SHOP,
        points: 45,
        voucher: "[Voucher] Deposit notice\nReceived a 2,000 listing service fee in cash.",
        objective: "Revenue increases and cash increases.",
        debit: ("Cash", 2000),
        credit: ("Service Revenue", 2000),
        hints: [
            "Cash coming in is a debit to Cash.",
            "Service revenue is revenue, so it goes on the credit side.",
        ],
    },
    DailyTemplate {
        title: "Workshop: wages paid in cash",
        shop: WORKSHOP,
        points: 50,
        voucher: "[Voucher] Payroll sheet\nPaid this week's part-time wages of 3,000 in cash.",
        objective: "Salaries expense increases and cash decreases.",
        debit: ("Salaries Expense", 3000),
        credit: ("Cash", 3000),
        hints: [
            "Expense increases usually go on the debit side.",
            "Cash flowing out is a credit to Cash.",
        ],
    },
];

/// Id of the form "D" followed by six uppercase hex characters.
pub fn daily_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("D{}", hex[..6].to_uppercase())
}

/// A random daily exercise built from one of the templates.
pub fn daily_exercise<R: Rng + ?Sized>(rng: &mut R) -> Exercise {
    let t = &DAILY_TEMPLATES[rng.gen_range(0..DAILY_TEMPLATES.len())];

    Exercise {
        id: daily_id(),
        title: t.title.to_string(),
        shop: t.shop.to_string(),
        difficulty: Difficulty::Daily,
        points: t.points,
        voucher: t.voucher.to_string(),
        objective: t.objective.to_string(),
        hints: t.hints.iter().map(|h| h.to_string()).collect(),
        answer: Entry::new(vec![
            JournalLine::debit(t.debit.0, t.debit.1),
            JournalLine::credit(t.credit.0, t.credit.1),
        ]),
    }
}
