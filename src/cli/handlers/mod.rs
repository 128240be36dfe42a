use std::path::Path;

use chrono::Utc;
use ratatui::style::Style;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::json_io;
use crate::mention::{AutocompleteController, MentionLookup, TextboxId, tokenize};
use crate::model::{ClientConfig, Task, TaskStatus};
use crate::ops::activity_format::format_action;
use crate::ops::board_ops::{Board, parse_columns};
use crate::ops::comment_ops::{
    PreparedComment, prepare_comment, prepare_delete_comment, prepare_delete_reply, prepare_edit_comment,
    prepare_edit_reply, prepare_reply,
};
use crate::ops::invitation_ops::{self, prepare_accept, prepare_decline};
use crate::ops::notification_ops::{NotificationCenter, POLL_INTERVAL};
use crate::render::{Theme, ThreadView, fragments_to_line, thread_lines};
use crate::util::time::relative_or_dash;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by every command
pub struct Context {
    pub config: ClientConfig,
    pub theme: Theme,
    pub json: bool,
}

impl Context {
    pub fn new(config: ClientConfig, json: bool) -> Self {
        let theme = Theme::from_config(&config.ui);
        Context { config, theme, json }
    }

    fn color(&self) -> bool {
        self.config.ui.color
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, ctx: &Context) -> CmdResult {
    match command {
        // Mentions
        Commands::Tokenize(args) => cmd_tokenize(args, ctx),
        Commands::Thread(args) => cmd_thread(args, ctx),
        Commands::Suggest(args) => cmd_suggest(args, ctx),
        Commands::Complete(args) => cmd_complete(args, ctx),
        Commands::Comment(args) => cmd_comment(args, ctx),

        // Feeds
        Commands::Activity(args) => cmd_activity(args, ctx),
        Commands::Activities(args) => cmd_activities(args, ctx),
        Commands::Notifications(args) => cmd_notifications(args, ctx),
        Commands::Invitation(args) => cmd_invitation(args, ctx),

        // Board
        Commands::Board(args) => cmd_board(args, ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lookup_for(task: Option<&Path>) -> Result<MentionLookup, Box<dyn std::error::Error>> {
    match task {
        Some(path) => Ok(MentionLookup::for_task(&json_io::read_task(path)?)),
        None => Ok(MentionLookup::default()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Mention commands
// ---------------------------------------------------------------------------

fn cmd_tokenize(args: TokenizeArgs, ctx: &Context) -> CmdResult {
    let lookup = lookup_for(args.task.as_deref())?;
    let segments = tokenize(&args.text, &lookup);
    if ctx.json {
        return print_json(&segments);
    }
    for segment in &segments {
        println!("{}", format_segment(segment));
    }
    Ok(())
}

fn cmd_thread(args: ThreadArgs, ctx: &Context) -> CmdResult {
    let task = json_io::read_task(&args.task)?;
    let lookup = MentionLookup::for_task(&task);
    if ctx.json {
        let comments: Vec<_> = task
            .comments
            .iter()
            .map(|c| comment_to_json(c, &lookup))
            .collect();
        return print_json(&comments);
    }
    let view = ThreadView::new(&task, &lookup, Utc::now());
    for line in thread_lines(&view, &ctx.theme) {
        println!("{}", line_to_ansi(&line, ctx.color()));
    }
    Ok(())
}

fn cmd_suggest(args: SuggestArgs, ctx: &Context) -> CmdResult {
    let task = json_io::read_task(&args.task)?;
    let textbox = match args.reply {
        Some(comment_id) => {
            if task.find_comment(&comment_id).is_none() {
                return Err(format!("comment not found: {}", comment_id).into());
            }
            TextboxId::Reply(comment_id)
        }
        None => TextboxId::Comment,
    };
    let mut controller = AutocompleteController::new();
    let state = controller.on_input(textbox, &args.text, task.participants());
    let limit = ctx.config.ui.max_suggestions;
    if ctx.json {
        return print_json(&suggest_to_json(state, limit));
    }
    for line in format_candidates(state, limit) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_complete(args: CompleteArgs, ctx: &Context) -> CmdResult {
    let task = json_io::read_task(&args.task)?;
    let wanted = args.username.trim_start_matches('@').to_lowercase();
    let user = task
        .participants()
        .into_iter()
        .find(|u| u.username.as_deref().is_some_and(|n| n.to_lowercase() == wanted))
        .ok_or_else(|| format!("not a participant on task {}: {}", task.id, args.username))?;
    let mut controller = AutocompleteController::new();
    controller.on_input(TextboxId::Comment, &args.text, task.participants());
    let completed = controller.select(&args.text, user);
    if ctx.json {
        return print_json(&serde_json::json!({ "text": completed }));
    }
    println!("{}", completed);
    Ok(())
}

fn cmd_comment(args: CommentArgs, ctx: &Context) -> CmdResult {
    let task = json_io::read_task(&args.task)?;
    if let Some(target) = &args.delete {
        let prepared = match &args.reply {
            Some(comment_id) => prepare_delete_reply(&task, comment_id, target)?,
            None => prepare_delete_comment(&task, target)?,
        };
        if ctx.json {
            return print_json(&prepared);
        }
        println!("{} {}", prepared.method, prepared.path);
        return Ok(());
    }

    let text = args.text.as_deref().unwrap_or_default();
    let prepared: PreparedComment = match (&args.edit, &args.reply) {
        (Some(reply_id), Some(comment_id)) => prepare_edit_reply(&task, comment_id, reply_id, text)?,
        (Some(comment_id), None) => prepare_edit_comment(&task, comment_id, text)?,
        (None, Some(comment_id)) => prepare_reply(&task, comment_id, text)?,
        (None, None) => prepare_comment(&task, text)?,
    };
    if ctx.json {
        return print_json(&prepared);
    }
    println!("{} {}", prepared.method, prepared.path);
    println!("{}", serde_json::to_string_pretty(&prepared.payload)?);
    if !prepared.mentions.is_empty() {
        println!("mentions: {}", prepared.mentions.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Feed commands
// ---------------------------------------------------------------------------

fn cmd_activity(args: ActivityArgs, ctx: &Context) -> CmdResult {
    let lookup = lookup_for(args.task.as_deref())?;
    let fragments = format_action(&args.action, &lookup);
    if ctx.json {
        return print_json(&fragments);
    }
    let line = fragments_to_line(&fragments, &ctx.theme);
    println!("{}", line_to_ansi(&line, ctx.color()));
    Ok(())
}

fn cmd_activities(args: ActivitiesArgs, ctx: &Context) -> CmdResult {
    let activities = json_io::read_activities(&args.file)?;
    let lookup = lookup_for(args.task.as_deref())?;
    let selected = activities
        .iter()
        .filter(|a| args.task_id.as_ref().is_none_or(|id| a.task_id.as_ref() == Some(id)));

    if ctx.json {
        let out: Vec<_> = selected
            .map(|a| activity_to_json(a, format_action(&a.action, &lookup)))
            .collect();
        return print_json(&out);
    }

    let now = Utc::now();
    let mut any = false;
    for activity in selected {
        any = true;
        let line = fragments_to_line(&format_action(&activity.action, &lookup), &ctx.theme);
        let when = relative_or_dash(activity.created_at, now);
        let dim = Style::default().fg(ctx.theme.dim);
        println!(
            "{}  {}",
            line_to_ansi(&line, ctx.color()),
            style_text(&format!("({when})"), dim, ctx.color())
        );
        for file in &activity.files {
            println!("    [{}] {}", file.kind().as_str(), file.name);
        }
    }
    if !any {
        println!("no activity");
    }
    Ok(())
}

fn cmd_notifications(args: NotificationsArgs, ctx: &Context) -> CmdResult {
    let center = NotificationCenter::new(json_io::read_notifications(&args.file)?);
    if ctx.json {
        return print_json(&NotificationsJson {
            unread: center.unread_count(),
            poll_interval_secs: POLL_INTERVAL.as_secs(),
            notifications: center.items(),
        });
    }
    println!(
        "{} unread (refreshed every {}s)",
        center.unread_count(),
        POLL_INTERVAL.as_secs()
    );
    let now = Utc::now();
    for notification in center.items() {
        let fragments = invitation_ops::message_fragments(notification);
        let message = line_to_ansi(&fragments_to_line(&fragments, &ctx.theme), ctx.color());
        println!("{}", format_notification(notification, &message, now));
    }
    Ok(())
}

fn cmd_invitation(args: InvitationArgs, ctx: &Context) -> CmdResult {
    let center = NotificationCenter::new(json_io::read_notifications(&args.file)?);
    let notification = center
        .items()
        .iter()
        .find(|n| n.id == args.notification)
        .ok_or_else(|| format!("notification not found: {}", args.notification))?;
    let prepared = if args.decline {
        prepare_decline(notification)?
    } else {
        prepare_accept(notification)?
    };
    if ctx.json {
        return print_json(&prepared);
    }
    println!("{} {}", prepared.method, prepared.path);
    Ok(())
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected: pending, inProgress, completed)",
            s
        )
    })
}

fn cmd_board(args: BoardArgs, ctx: &Context) -> CmdResult {
    let tasks: Vec<Task> = json_io::read_tasks(&args.tasks)?;
    let mut board = Board::from_tasks(tasks, &parse_columns(&ctx.config.board.columns));

    if let (Some(id), Some(to)) = (&args.move_id, &args.to) {
        let to = parse_status(to)?;
        let change = board.move_task(id, to)?;
        if ctx.json {
            return print_json(&change);
        }
        match change {
            Some(change) => println!("{}", format_status_change(&change)),
            None => println!("{}: already {}", id, to),
        }
        return Ok(());
    }

    if ctx.json {
        return print_json(&board_to_json(&board));
    }
    for line in format_board(&board) {
        println!("{}", line);
    }
    Ok(())
}
