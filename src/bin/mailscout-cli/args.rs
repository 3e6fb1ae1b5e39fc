use clap::{ArgAction, Args, Parser, Subcommand};
use mailscout::{NameInput, ScoutOptions};

#[derive(Parser)]
#[command(name = "mailscout-cli", version, about = "Find and verify e-mail addresses via SMTP")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human", global = true)]
    pub format: String,

    /// write report to file (JSON/NDJSON/CSV per --format)
    #[arg(long, global = true)]
    pub out: Option<String>,

    /// verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe candidates for one domain
    Find {
        domain: String,
        /// full name of a person (repeatable, one person per flag)
        #[arg(long = "name")]
        names: Vec<String>,
        #[command(flatten)]
        scout: ScoutArgs,
    },
    /// Probe every {domain, names} entry of a JSON array
    Bulk {
        /// JSON file to read (stdin when omitted)
        #[arg(long)]
        input: Option<String>,
        #[command(flatten)]
        scout: ScoutArgs,
    },
    /// List generated candidates without probing
    Candidates {
        domain: String,
        #[arg(long = "name")]
        names: Vec<String>,
        #[command(flatten)]
        scout: ScoutArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScoutArgs {
    /// skip name-based variants
    #[arg(long)]
    pub no_variants: bool,
    /// skip role-based prefixes
    #[arg(long)]
    pub no_prefixes: bool,
    /// clear the catch-all flag
    #[arg(long)]
    pub no_catchall: bool,
    /// keep accents and punctuation in names
    #[arg(long)]
    pub no_normalize: bool,
    #[arg(long, default_value_t = 5)]
    pub threads: usize,
    /// threads used by `bulk`
    #[arg(long = "bulk-threads", default_value_t = 1)]
    pub bulk_threads: usize,
    /// SMTP timeout in seconds (0 disables it)
    #[arg(long = "timeout", default_value_t = 2)]
    pub timeout_secs: u64,
    #[arg(long, default_value_t = 25)]
    pub port: u16,
    /// name sent with EHLO/HELO
    #[arg(long)]
    pub helo: Option<String>,
    /// envelope MAIL FROM (default noreply@<helo>)
    #[arg(long = "from")]
    pub mail_from: Option<String>,
    /// probe every candidate until one is found
    #[arg(long = "probe-all")]
    pub probe_all: bool,
    /// random pause between probes, in milliseconds
    #[arg(long = "probe-delay", num_args = 2, value_names = ["MIN_MS", "MAX_MS"])]
    pub probe_delay: Vec<u64>,
}

impl ScoutArgs {
    pub fn to_options(&self) -> ScoutOptions {
        let defaults = ScoutOptions::default();
        ScoutOptions {
            check_variants: !self.no_variants,
            check_prefixes: !self.no_prefixes,
            check_catchall: !self.no_catchall,
            normalize: !self.no_normalize,
            num_threads: self.threads,
            num_bulk_threads: self.bulk_threads,
            smtp_timeout: self.timeout_secs,
            smtp_port: self.port,
            helo_domain: self.helo.clone().unwrap_or(defaults.helo_domain),
            mail_from: self.mail_from.clone().unwrap_or(defaults.mail_from),
            probe_all: self.probe_all,
            probe_delay_ms: match self.probe_delay.as_slice() {
                [min, max] => Some((*min, *max)),
                _ => None,
            },
        }
    }
}

/// One `--name` is a single full name, several are one person each.
pub fn names_from_args(names: &[String]) -> Option<NameInput> {
    match names {
        [] => None,
        [single] => Some(NameInput::Single(single.clone())),
        many => Some(NameInput::PerPerson(
            many.iter().map(|name| vec![name.clone()]).collect(),
        )),
    }
}
