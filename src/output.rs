//! Output formatting: the two fixed-width tables and JSON.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::io::{self, Write};

use cross_review::{Assignment, ParticipantId};
use serde::Serialize;

const COLUMN_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tables {
    All,
    ToReview,
    ReviewedBy,
}

fn write_header<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    // the leading "# " eats two columns of the first field
    writeln!(
        out,
        "# {:>key_width$}{:>width$}",
        key,
        value,
        key_width = COLUMN_WIDTH - 2,
        width = COLUMN_WIDTH
    )
}

fn write_map<W: Write, T: Display>(out: &mut W, map: &BTreeMap<T, BTreeSet<T>>) -> io::Result<()> {
    for (id, others) in map {
        write!(out, "{:>width$}", id, width = COLUMN_WIDTH)?;
        for other in others {
            write!(out, "{:>width$}", other, width = COLUMN_WIDTH)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_to_review<W: Write, T: ParticipantId>(out: &mut W, assignment: &Assignment<T>) -> io::Result<()> {
    let title = format!("NEED_TO_REVIEW({})", assignment.reviewers_per_participant());
    write_header(out, "ID", &title)?;
    write_map(out, assignment.needs_to_review())
}

fn write_reviewed_by<W: Write, T: ParticipantId>(out: &mut W, assignment: &Assignment<T>) -> io::Result<()> {
    let title = format!("REVIEWED_BY({})", assignment.reviewers_per_participant());
    write_header(out, "ID", &title)?;
    write_map(out, assignment.reviewed_by())
}

/// Print the selected tables followed by a summary line.
pub fn write_tables<W: Write, T: ParticipantId>(
    out: &mut W,
    assignment: &Assignment<T>,
    tables: Tables,
) -> io::Result<()> {
    match tables {
        Tables::ToReview => write_to_review(out, assignment)?,
        Tables::ReviewedBy => write_reviewed_by(out, assignment)?,
        Tables::All => {
            write_to_review(out, assignment)?;
            writeln!(out)?;
            write_reviewed_by(out, assignment)?;
        }
    }
    // every value is padded with two spaces on each side
    writeln!(
        out,
        "# max_flow:  {}  num_of_peers:  {}  num_of_reviewers_per_peer:  {}",
        assignment.total_reviews(),
        assignment.num_participants(),
        assignment.reviewers_per_participant()
    )
}

pub fn write_json<W: Write, T: ParticipantId + Serialize>(
    out: &mut W,
    assignment: &Assignment<T>,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, assignment)?;
    writeln!(out).map_err(serde_json::Error::io)
}
