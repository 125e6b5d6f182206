use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Plain,
}

#[derive(Parser)]
#[command(name = "jtk")]
#[command(about = "A CLI for Jira Cloud issues, boards and sprints", version)]
#[command(after_help = "EXAMPLES:
    jtk config set --domain company --email me@company.com --token <token>
    jtk issues list --project PROJ --status \"In Progress\"
    jtk issues get PROJ-123
    jtk transitions do PROJ-123 Done
    jtk search \"project = PROJ ORDER BY updated DESC\" --max 20")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, plain)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log HTTP requests and other diagnostics to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage stored credentials
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Work with issues
    Issues {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// List or perform workflow transitions
    Transitions {
        #[command(subcommand)]
        action: TransitionCommands,
    },
    /// Work with issue comments
    Comments {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Browse agile boards
    Boards {
        #[command(subcommand)]
        action: BoardCommands,
    },
    /// Browse sprints
    Sprints {
        #[command(subcommand)]
        action: SprintCommands,
    },
    /// Search issues with JQL
    #[command(after_help = "EXAMPLES:
    jtk search \"assignee = currentUser() AND resolution = Unresolved\"
    jtk search \"project = PROJ\" --max 200 --fields summary,status")]
    Search(SearchArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    jtk completion bash > ~/.bash_completion.d/jtk
    jtk completion zsh > ~/.zfunc/_jtk
    jtk completion fish > ~/.config/fish/completions/jtk.fish")]
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Save credentials to the config file
    #[command(after_help = "EXAMPLES:
    jtk config set --domain company --email me@company.com --token <token>
    jtk config set --token <new-token>")]
    Set(ConfigSetArgs),
    /// Show the resolved configuration
    Show,
    /// Delete the config file
    Clear,
    /// Check the credentials against Jira
    Test,
}

#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Site name, e.g. `company` for company.atlassian.net
    #[arg(long)]
    pub domain: Option<String>,

    /// Atlassian account email
    #[arg(long)]
    pub email: Option<String>,

    /// API token
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// Show issue details
    Get {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
    /// List issues matching simple filters
    #[command(after_help = "EXAMPLES:
    jtk issues list --project PROJ
    jtk issues list --assignee me --status \"To Do\" --max 10")]
    List(IssueListArgs),
    /// Create a new issue
    #[command(after_help = "EXAMPLES:
    jtk issues create --project PROJ --type Task --summary \"Fix login\"
    jtk issues create --project PROJ --type Bug --summary \"Crash\" --field 'labels=[\"urgent\"]'")]
    Create(IssueCreateArgs),
    /// Update fields of an issue
    #[command(after_help = "EXAMPLES:
    jtk issues update PROJ-123 --summary \"New title\"
    jtk issues update PROJ-123 --field 'priority={\"name\":\"High\"}'")]
    Update(IssueUpdateArgs),
    /// Delete an issue
    Delete {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
    /// Assign an issue, or clear its assignee
    #[command(after_help = "EXAMPLES:
    jtk issues assign PROJ-123 me
    jtk issues assign PROJ-123 5b10ac8d82e05b22cc7d4ef5
    jtk issues assign PROJ-123 --unassign")]
    Assign {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Account ID, or `me` for the authenticated user
        #[arg(conflicts_with = "unassign", required_unless_present = "unassign")]
        account: Option<String>,

        /// Remove the current assignee
        #[arg(long)]
        unassign: bool,
    },
    /// Show the editable fields of an issue
    Meta {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
    /// Open an issue in the browser
    Open {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct IssueListArgs {
    /// Filter by project key
    #[arg(long, short)]
    pub project: Option<String>,

    /// Filter by status name
    #[arg(long, short)]
    pub status: Option<String>,

    /// Filter by assignee account ID, or `me`
    #[arg(long, short)]
    pub assignee: Option<String>,

    /// Maximum number of issues to show
    #[arg(long, short, default_value = "50")]
    pub max: usize,
}

#[derive(Args, Debug)]
pub struct IssueCreateArgs {
    /// Project key
    #[arg(long, short)]
    pub project: String,

    /// Issue type name (e.g., Task, Bug, Story)
    #[arg(long = "type", short = 't')]
    pub issue_type: String,

    /// Issue summary
    #[arg(long, short)]
    pub summary: String,

    /// Plain-text description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Extra field as key=value; values that parse as JSON are sent as JSON
    #[arg(long = "field", short = 'f', value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Args, Debug)]
pub struct IssueUpdateArgs {
    /// Issue key (e.g., PROJ-123)
    pub key: String,

    /// New summary
    #[arg(long, short)]
    pub summary: Option<String>,

    /// New plain-text description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Field to set as key=value; values that parse as JSON are sent as JSON
    #[arg(long = "field", short = 'f', value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Subcommand)]
pub enum TransitionCommands {
    /// List transitions available for an issue
    List {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
    /// Move an issue through a transition
    #[command(after_help = "EXAMPLES:
    jtk transitions do PROJ-123 \"In Progress\"
    jtk transitions do PROJ-123 31")]
    Do {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Transition name or ID
        transition: String,
    },
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// List comments on an issue
    List {
        /// Issue key (e.g., PROJ-123)
        key: String,
    },
    /// Add a plain-text comment
    Add {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Comment text
        text: String,
    },
    /// Delete a comment
    Delete {
        /// Issue key (e.g., PROJ-123)
        key: String,

        /// Comment ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// List boards
    List {
        /// Only boards for this project key
        #[arg(long, short)]
        project: Option<String>,

        /// Maximum number of boards to show
        #[arg(long, short, default_value = "50")]
        max: u32,
    },
    /// Show a board
    Get {
        /// Board ID
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum SprintCommands {
    /// List sprints on a board
    #[command(after_help = "EXAMPLES:
    jtk sprints list --board 42
    jtk sprints list --board 42 --state active,future")]
    List {
        /// Board ID
        #[arg(long, short)]
        board: u64,

        /// Sprint state filter: future, active, closed (comma-separated)
        #[arg(long, short)]
        state: Option<String>,
    },
    /// Show a sprint
    Get {
        /// Sprint ID
        id: u64,
    },
    /// List issues in a sprint
    Issues {
        /// Sprint ID
        id: u64,

        /// Maximum number of issues to show
        #[arg(long, short, default_value = "50")]
        max: usize,
    },
    /// Show the active sprint of a board
    Current {
        /// Board ID
        #[arg(long, short)]
        board: u64,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JQL query
    pub jql: String,

    /// Maximum number of issues to return
    #[arg(long, short, default_value = "50")]
    pub max: usize,

    /// Fields to fetch, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}
