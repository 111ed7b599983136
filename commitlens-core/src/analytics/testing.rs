//! Commit builders for unit tests.

use chrono::{FixedOffset, NaiveDate, TimeZone};

use crate::types::{CommitAuthor, CommitRecord};

/// A commit by the default author at `hour` on `date` ("YYYY-MM-DD").
pub fn commit(date: &str, hour: u32, repo: &str) -> CommitRecord {
    commit_by(date, hour, repo, "ada", "Ada")
}

/// A commit by a specific author.
pub fn commit_by(date: &str, hour: u32, repo: &str, login: &str, name: &str) -> CommitRecord {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let when = FixedOffset::east_opt(0)
        .unwrap()
        .from_local_datetime(&day.and_hms_opt(hour, 15, 0).unwrap())
        .unwrap();
    let author = CommitAuthor::new(name, format!("{}@example.com", login)).with_login(login);
    CommitRecord::at(
        format!("{}-{:02}-{}-{}", date, hour, repo, login),
        repo,
        author,
        "update",
        when,
    )
}

/// A commit with a specific message.
pub fn commit_msg(date: &str, hour: u32, repo: &str, message: &str) -> CommitRecord {
    let mut c = commit(date, hour, repo);
    c.message = message.to_string();
    c
}
