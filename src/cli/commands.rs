use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ff", about = concat!("focusflow v", env!("CARGO_PKG_VERSION"), " - mentions, threads and activity for FocusFlow tasks"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./focusflow.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split text into literal and mention segments
    Tokenize(TokenizeArgs),
    /// Show a task's comment thread with mentions highlighted
    Thread(ThreadArgs),
    /// Format a single activity line
    Activity(ActivityArgs),
    /// Format every entry of an exported activity feed
    Activities(ActivitiesArgs),
    /// Show mention suggestions for text being typed
    Suggest(SuggestArgs),
    /// Insert a mention for USERNAME into the text
    Complete(CompleteArgs),
    /// Show tasks as Kanban columns, or preview a move
    Board(BoardArgs),
    /// List notifications with the unread count
    Notifications(NotificationsArgs),
    /// Validate a comment or reply (new, edited or deleted) and print the request
    Comment(CommentArgs),
    /// Accept or decline a task invitation from a notifications export
    Invitation(InvitationArgs),
}

// ---------------------------------------------------------------------------
// Mention args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TokenizeArgs {
    /// Text to tokenize
    pub text: String,
    /// Task JSON whose owner and assignees are the known participants
    #[arg(long)]
    pub task: Option<PathBuf>,
}

#[derive(Args)]
pub struct ThreadArgs {
    /// Task JSON including its comments
    pub task: PathBuf,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Text in the textbox so far
    pub text: String,
    /// Task JSON providing the participants
    #[arg(long)]
    pub task: PathBuf,
    /// Type into the reply box of this comment instead of the main box
    #[arg(long, value_name = "COMMENT_ID")]
    pub reply: Option<String>,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Text in the textbox so far
    pub text: String,
    /// Participant to insert
    pub username: String,
    /// Task JSON providing the participants
    #[arg(long)]
    pub task: PathBuf,
}

#[derive(Args)]
pub struct CommentArgs {
    /// Comment body
    #[arg(required_unless_present = "delete", conflicts_with = "delete")]
    pub text: Option<String>,
    /// Task JSON the comment belongs to
    #[arg(long)]
    pub task: PathBuf,
    /// Post as a reply to this comment
    #[arg(long, value_name = "COMMENT_ID")]
    pub reply: Option<String>,
    /// Replace the text of this comment (or of this reply, with --reply)
    #[arg(long, value_name = "ID", conflicts_with = "delete")]
    pub edit: Option<String>,
    /// Delete this comment (or this reply, with --reply)
    #[arg(long, value_name = "ID")]
    pub delete: Option<String>,
}

// ---------------------------------------------------------------------------
// Feed args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ActivityArgs {
    /// Raw action text, e.g. "bob uploaded file(s): a.png"
    pub action: String,
    /// Task JSON providing the participants
    #[arg(long)]
    pub task: Option<PathBuf>,
}

#[derive(Args)]
pub struct ActivitiesArgs {
    /// Exported activity feed JSON
    pub file: PathBuf,
    /// Only show activity for this task
    #[arg(long)]
    pub task_id: Option<String>,
    /// Task JSON whose participants resolve mentions in the feed
    #[arg(long)]
    pub task: Option<PathBuf>,
}

#[derive(Args)]
pub struct NotificationsArgs {
    /// Exported notifications JSON
    pub file: PathBuf,
}

#[derive(Args)]
pub struct InvitationArgs {
    /// Exported notifications JSON
    pub file: PathBuf,
    /// ID of the invitation notification
    pub notification: String,
    /// Decline instead of accepting
    #[arg(long)]
    pub decline: bool,
}

// ---------------------------------------------------------------------------
// Board args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardArgs {
    /// Exported task list JSON
    pub tasks: PathBuf,
    /// Task ID to move
    #[arg(long = "move", value_name = "ID", requires = "to")]
    pub move_id: Option<String>,
    /// Target status (pending, inProgress, completed)
    #[arg(long, value_name = "STATUS", requires = "move_id")]
    pub to: Option<String>,
}
