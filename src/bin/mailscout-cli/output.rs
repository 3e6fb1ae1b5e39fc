#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailscout::{BulkResult, Candidate, CandidateSource, VerificationResult};

/// What a subcommand produced, ready to be rendered in any `--format`.
pub enum Report {
    Results(Vec<VerificationResult>),
    Bulk(Vec<BulkResult>),
    Candidates(Vec<Candidate>),
}

impl Report {
    /// Exit status 2 unless some probe returned `found`; listing candidates
    /// never probes, so it always succeeds.
    pub fn none_found(&self) -> bool {
        match self {
            Self::Results(rows) => !rows.iter().any(VerificationResult::is_found),
            Self::Bulk(entries) => !entries
                .iter()
                .flat_map(|entry| &entry.valid_emails)
                .any(VerificationResult::is_found),
            Self::Candidates(_) => false,
        }
    }

    #[cfg(feature = "with-csv")]
    fn csv_rows(&self) -> Vec<Vec<String>> {
        match self {
            Self::Results(rows) => rows.iter().map(result_record).collect(),
            Self::Bulk(entries) => entries
                .iter()
                .flat_map(|entry| &entry.valid_emails)
                .map(result_record)
                .collect(),
            Self::Candidates(candidates) => candidates
                .iter()
                .map(|c| {
                    vec![
                        c.address.clone(),
                        c.local_part.clone(),
                        source_label(c.source).to_string(),
                    ]
                })
                .collect(),
        }
    }
}

pub fn write_report(report: &Report, cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(report),
        "json" => write_json(report, cli),
        "ndjson" => write_ndjson(report, cli),
        "csv" => write_csv(report, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

fn write_human(report: &Report) -> Result<()> {
    match report {
        Report::Results(rows) => {
            for row in rows {
                println!("{}", human_line(row));
            }
        }
        Report::Bulk(entries) => {
            for entry in entries {
                println!("{}:", entry.domain);
                for row in &entry.valid_emails {
                    println!("    {}", human_line(row));
                }
            }
        }
        Report::Candidates(candidates) => {
            for candidate in candidates {
                println!("{:<40} {}", candidate.address, source_label(candidate.source));
            }
        }
    }
    Ok(())
}

fn human_line(row: &VerificationResult) -> String {
    let tag = if row.is_found() { "[FOUND]    " } else { "[NOT FOUND]" };
    let email = if row.email.is_empty() {
        row.domain.as_str()
    } else {
        row.email.as_str()
    };
    if row.mx.is_empty() {
        format!("{tag} {email} :: {} ({:.3}s)", row.message, row.time_exec)
    } else {
        format!(
            "{tag} {email} :: {} (mx={}, {:.3}s)",
            row.message, row.mx, row.time_exec
        )
    }
}

fn source_label(source: CandidateSource) -> &'static str {
    match source {
        CandidateSource::NameVariant => "name_variant",
        CandidateSource::RolePrefix => "role_prefix",
    }
}

#[cfg(feature = "with-serde")]
fn to_json_pretty(report: &Report) -> serde_json::Result<String> {
    match report {
        Report::Results(rows) => serde_json::to_string_pretty(rows),
        Report::Bulk(entries) => serde_json::to_string_pretty(entries),
        Report::Candidates(candidates) => serde_json::to_string_pretty(candidates),
    }
}

#[cfg(feature = "with-serde")]
fn to_json_lines(report: &Report) -> serde_json::Result<Vec<String>> {
    fn lines<T: serde::Serialize>(items: &[T]) -> serde_json::Result<Vec<String>> {
        items.iter().map(serde_json::to_string).collect()
    }
    match report {
        Report::Results(rows) => lines(rows),
        Report::Bulk(entries) => lines(entries),
        Report::Candidates(candidates) => lines(candidates),
    }
}

#[cfg(feature = "with-serde")]
fn write_json(report: &Report, cli: &Cli) -> Result<()> {
    let s = to_json_pretty(report)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &Report, _: &Cli) -> Result<()> {
    bail!("format=json requires the 'with-serde' feature")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(report: &Report, cli: &Cli) -> Result<()> {
    let lines = to_json_lines(report)?;
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for line in &lines {
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &Report, _: &Cli) -> Result<()> {
    bail!("format=ndjson requires the 'with-serde' feature")
}

#[cfg(feature = "with-csv")]
const RESULT_COLUMNS: [&str; 9] = [
    "email",
    "status",
    "message",
    "user_name",
    "domain",
    "mx",
    "connections",
    "ver_ops",
    "time_exec",
];

#[cfg(feature = "with-csv")]
const CANDIDATE_COLUMNS: [&str; 3] = ["address", "local_part", "source"];

#[cfg(feature = "with-csv")]
fn csv_bytes(report: &Report) -> Result<Vec<u8>> {
    let header: &[&str] = match report {
        Report::Results(_) | Report::Bulk(_) => &RESULT_COLUMNS,
        Report::Candidates(_) => &CANDIDATE_COLUMNS,
    };
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(header)?;
    for record in report.csv_rows() {
        wtr.write_record(&record)?;
    }
    Ok(wtr.into_inner()?)
}

#[cfg(feature = "with-csv")]
fn write_csv(report: &Report, cli: &Cli) -> Result<()> {
    use std::io::Write;

    let data = csv_bytes(report)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, &data)?;
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&data)?;
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &Report, _: &Cli) -> Result<()> {
    bail!("format=csv requires the 'with-csv' feature")
}

#[cfg(feature = "with-csv")]
fn result_record(row: &VerificationResult) -> Vec<String> {
    vec![
        row.email.clone(),
        row.status.to_string(),
        row.message.clone(),
        row.user_name.clone(),
        row.domain.clone(),
        row.mx.clone(),
        row.connections.to_string(),
        row.ver_ops.to_string(),
        format!("{:.3}", row.time_exec),
    ]
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailscout::VerificationStatus;

    fn row(status: VerificationStatus, mx: &str) -> VerificationResult {
        VerificationResult {
            email: "john.doe@acme.com".to_string(),
            status,
            message: "250 2.1.5 Ok".to_string(),
            user_name: "John Doe".to_string(),
            domain: "acme.com".to_string(),
            mx: mx.to_string(),
            connections: 1,
            ver_ops: 2,
            time_exec: 0.25,
        }
    }

    #[test]
    fn human_line_mentions_mx_when_known() {
        assert_eq!(
            human_line(&row(VerificationStatus::Found, "mx.acme.com")),
            "[FOUND]     john.doe@acme.com :: 250 2.1.5 Ok (mx=mx.acme.com, 0.250s)"
        );
        assert!(human_line(&row(VerificationStatus::NotFound, "")).starts_with("[NOT FOUND] "));
    }

    #[cfg(feature = "with-csv")]
    #[test]
    fn csv_starts_with_column_names() {
        let report = Report::Results(vec![row(VerificationStatus::Found, "mx.acme.com")]);
        let text = String::from_utf8(csv_bytes(&report).expect("csv")).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("email,status,message,user_name,domain,mx,connections,ver_ops,time_exec")
        );
        assert_eq!(
            lines.next(),
            Some("john.doe@acme.com,found,250 2.1.5 Ok,John Doe,acme.com,mx.acme.com,1,2,0.250")
        );

        let candidates = Report::Candidates(Vec::new());
        let text = String::from_utf8(csv_bytes(&candidates).expect("csv")).expect("utf8");
        assert_eq!(text.trim_end(), "address,local_part,source");
    }

    #[test]
    fn exit_status_tracks_found_rows() {
        let found = Report::Results(vec![row(VerificationStatus::Found, "mx")]);
        let missed = Report::Bulk(vec![BulkResult {
            domain: "acme.com".to_string(),
            names: None,
            valid_emails: vec![row(VerificationStatus::NotFound, "")],
        }]);
        assert!(!found.none_found());
        assert!(missed.none_found());
        assert!(!Report::Candidates(Vec::new()).none_found());
    }
}
