//! Test utilities for spendlens-core
//!
//! Deterministic fixture builders: fixed timestamps and a fixed generation
//! schedule so the same inputs always serialize to the same bytes.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};

use crate::models::{Category, ExpenseRecord, Priority};

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// Build an expense with medium priority, no tags, and fixed timestamps
pub fn expense(
    id: &str,
    description: &str,
    amount: f64,
    category: Category,
    date: &str,
) -> ExpenseRecord {
    ExpenseRecord {
        id: id.to_string(),
        description: description.to_string(),
        amount,
        category,
        date: date.to_string(),
        priority: Priority::Medium,
        tags: Vec::new(),
        notes: None,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// Build an expense with an explicit priority
pub fn expense_with_priority(
    id: &str,
    description: &str,
    amount: f64,
    category: Category,
    date: &str,
    priority: Priority,
) -> ExpenseRecord {
    ExpenseRecord {
        priority,
        ..expense(id, description, amount, category, date)
    }
}

/// One month of deterministic sample data for a hostel student's budget:
/// fixed bills on the 1st, mess meals every day, auto rides on Monday,
/// Wednesday, and Friday, and a movie each Sunday. Runs from the 1st of the
/// month containing `today` through `today`.
pub fn sample_month(today: NaiveDate) -> Vec<ExpenseRecord> {
    let month_start = today.with_day(1).expect("day 1 always valid");
    let mut records = Vec::new();
    let mut sequence = 0usize;

    let mut push = |records: &mut Vec<ExpenseRecord>,
                    description: &str,
                    amount: f64,
                    category: Category,
                    date: NaiveDate,
                    priority: Priority,
                    tags: &[&str]| {
        sequence += 1;
        let mut record = expense_with_priority(
            &format!("seed-{:03}", sequence),
            description,
            amount,
            category,
            &date.format("%Y-%m-%d").to_string(),
            priority,
        );
        record.tags = tags.iter().map(|t| t.to_string()).collect();
        records.push(record);
    };

    // Monthly fixed expenses on the 1st
    push(
        &mut records,
        "Hostel Rent",
        8000.0,
        Category::Housing,
        month_start,
        Priority::High,
        &["hostel", "rent"],
    );
    push(
        &mut records,
        "College Fees",
        5000.0,
        Category::Education,
        month_start,
        Priority::High,
        &["college", "fees"],
    );
    push(
        &mut records,
        "Internet Bill",
        700.0,
        Category::Utilities,
        month_start,
        Priority::Medium,
        &["wifi", "internet"],
    );

    let mut day = month_start;
    while day <= today {
        push(
            &mut records,
            "Mess Lunch",
            80.0,
            Category::FoodAndDining,
            day,
            Priority::Medium,
            &["mess", "lunch"],
        );
        push(
            &mut records,
            "Mess Dinner",
            80.0,
            Category::FoodAndDining,
            day,
            Priority::Medium,
            &["mess", "dinner"],
        );
        if matches!(day.weekday(), Weekday::Mon | Weekday::Wed | Weekday::Fri) {
            push(
                &mut records,
                "Auto",
                100.0,
                Category::Transportation,
                day,
                Priority::Medium,
                &["auto", "local"],
            );
        }
        if day.weekday() == Weekday::Sun {
            push(
                &mut records,
                "Movie Ticket",
                200.0,
                Category::Entertainment,
                day,
                Priority::Low,
                &["movie", "entertainment"],
            );
        }
        day += Duration::days(1);
    }

    records
}
