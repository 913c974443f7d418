use clap::{Args, Parser, Subcommand, ValueEnum};
use goodfirst_api::{IssueKind, IssueState, SearchParams, SortKey, SortOrder};
use goodfirst_core::SearchConfig;

#[derive(Debug, Parser)]
#[command(name = "good-first-issue")]
#[command(
    version,
    about = "Find beginner-friendly issues on GitHub",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Search options when no subcommand is given
    #[command(flatten)]
    pub find: FindArgs,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search for issues (the default)
    Find(FindArgs),
    /// Open an issue from the last search in the browser
    Open {
        /// Result number shown in the `#` column
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FindArgs {
    /// Repository language, e.g. rust
    #[arg(short, long)]
    pub language: Option<String>,

    /// Detect the language from files in the current directory
    #[arg(long, conflicts_with = "language")]
    pub auto_language: bool,

    /// Extra labels to search for (comma separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Search only the given labels instead of adding them to the defaults
    #[arg(long, requires = "labels")]
    pub only_labels: bool,

    /// Restrict to one organization
    #[arg(short, long)]
    pub org: Option<String>,

    /// Restrict to one repository (owner/name)
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Let GitHub sort the results instead of ranking them
    #[arg(short, long, value_enum)]
    pub sort: Option<SortArg>,

    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Results per page (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    #[arg(long, value_enum)]
    pub state: Option<StateArg>,

    /// Only issues nobody is assigned to
    #[arg(long)]
    pub unassigned: bool,

    /// Search pull requests instead of issues
    #[arg(long)]
    pub prs: bool,

    /// Raw GitHub search query; replaces every filter above
    #[arg(short, long)]
    pub query: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Created,
    Updated,
    Comments,
    Reactions,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Created => SortKey::Created,
            SortArg::Updated => SortKey::Updated,
            SortArg::Comments => SortKey::Comments,
            SortArg::Reactions => SortKey::Reactions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Open,
    Closed,
}

impl From<StateArg> for IssueState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Open => IssueState::Open,
            StateArg::Closed => IssueState::Closed,
        }
    }
}

impl FindArgs {
    /// Merge the flags over the `[search]` config section.
    ///
    /// `detect` is only consulted for `--auto-language`.
    pub fn to_params<F>(&self, config: &SearchConfig, detect: F) -> SearchParams
    where
        F: FnOnce() -> Option<String>,
    {
        let language = match (&self.language, self.auto_language) {
            (Some(language), _) => Some(language.clone()),
            (None, true) => detect(),
            (None, false) => None,
        };

        SearchParams {
            language,
            labels: self.labels(config),
            org: self.org.clone(),
            repo: self.repo.clone(),
            state: self.state.map(Into::into),
            sort: self.sort.map(Into::into),
            order: self.order.map(Into::into),
            page: self.page,
            per_page: Some(self.limit.unwrap_or(config.per_page)),
            raw_query: self.query.clone().filter(|q| !q.trim().is_empty()),
            no_assignee: self.unassigned,
            kind: Some(if self.prs {
                IssueKind::Pr
            } else {
                IssueKind::Issue
            }),
        }
    }

    fn labels(&self, config: &SearchConfig) -> Vec<String> {
        let mut labels = if self.only_labels {
            Vec::new()
        } else {
            config.labels.clone()
        };

        for label in &self.labels {
            let label = label.trim();
            if !label.is_empty() && !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goodfirst_core::DEFAULT_LABELS;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("good-first-issue").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_find_is_the_default_command() {
        let cli = parse(&["-l", "rust", "--limit", "5"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.find.language.as_deref(), Some("rust"));
        assert_eq!(cli.find.limit, Some(5));
    }

    #[test]
    fn test_explicit_find_subcommand() {
        let cli = parse(&["find", "--org", "rust-lang", "--json", "-v"]);

        match cli.command {
            Some(Commands::Find(args)) => {
                assert_eq!(args.org.as_deref(), Some("rust-lang"));
                assert!(args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_open_accepts_negative_numbers() {
        let cli = parse(&["open", "-2"]);
        assert!(matches!(cli.command, Some(Commands::Open { index: -2 })));
    }

    #[test]
    fn test_limit_is_bounded() {
        let too_big = Cli::try_parse_from(["good-first-issue", "--limit", "101"]);
        assert!(too_big.is_err());
        let zero = Cli::try_parse_from(["good-first-issue", "--limit", "0"]);
        assert!(zero.is_err());
    }

    #[test]
    fn test_defaults_become_params() {
        let params = FindArgs::default().to_params(&SearchConfig::default(), || None);

        assert_eq!(params.labels.len(), DEFAULT_LABELS.len());
        assert_eq!(params.per_page, Some(30));
        assert_eq!(params.kind, Some(IssueKind::Issue));
        assert!(params.sort.is_none());
        assert!(params.language.is_none());
    }

    #[test]
    fn test_labels_extend_defaults_without_duplicates() {
        let cli = parse(&["--labels", "docs,good first issue", "--labels", "rust"]);
        let params = cli.find.to_params(&SearchConfig::default(), || None);

        assert_eq!(params.labels.len(), DEFAULT_LABELS.len() + 2);
        assert_eq!(params.labels[params.labels.len() - 2], "docs");
        assert_eq!(params.labels[params.labels.len() - 1], "rust");
    }

    #[test]
    fn test_only_labels_replaces_defaults() {
        let cli = parse(&["--labels", "docs", "--only-labels"]);
        let params = cli.find.to_params(&SearchConfig::default(), || None);

        assert_eq!(params.labels, vec!["docs".to_string()]);
    }

    #[test]
    fn test_auto_language_uses_detector() {
        let cli = parse(&["--auto-language"]);
        let params = cli
            .find
            .to_params(&SearchConfig::default(), || Some("rust".into()));
        assert_eq!(params.language.as_deref(), Some("rust"));

        let cli = parse(&[]);
        let params = cli
            .find
            .to_params(&SearchConfig::default(), || panic!("detector must not run"));
        assert!(params.language.is_none());
    }

    #[test]
    fn test_flags_map_to_params() {
        let cli = parse(&[
            "-s", "comments", "--order", "asc", "--state", "open", "--unassigned", "--prs",
            "--page", "2", "-q", "is:issue label:bug",
        ]);
        let params = cli.find.to_params(&SearchConfig::default(), || None);

        assert_eq!(params.sort, Some(SortKey::Comments));
        assert_eq!(params.order, Some(SortOrder::Asc));
        assert_eq!(params.state, Some(IssueState::Open));
        assert!(params.no_assignee);
        assert_eq!(params.kind, Some(IssueKind::Pr));
        assert_eq!(params.page, Some(2));
        assert_eq!(params.raw_query.as_deref(), Some("is:issue label:bug"));
    }
}
