// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! GILC CLI entrypoint.
//!
//! Renders catalog pages and diagrams as terminal text and runs the simulated assistant as a
//! line-oriented chat on stdin/stdout. Logs go to stderr (`RUST_LOG`, default `warn`).

use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use gilc::assistant::{tips_for, AssistantController, PageSection};
use gilc::catalog;
use gilc::config::{AssistantConfig, RenderConfig, DEFAULT_RENDER_WIDTH};
use gilc::content;
use gilc::diagram::{DiagramState, DiagramView, MermaidCompiler};
use gilc::error::CliError;
use gilc::model::Role;
use gilc::notify::{
    copy_message, MemoryClipboard, TracingNotifier, COPIED_TITLE, COPY_FAILED_TITLE,
};
use gilc::proof::ProofAssistant;
use gilc::render::{DocumentRenderer, DocumentTheme};

#[derive(Parser, Debug)]
#[command(name = "gilc", about = "GILC problem pages, diagrams and simulated assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the problem catalog
    Problems {
        /// Only problems tagged with this category
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search over title and description
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long)]
        json: bool,
    },

    /// Render a content file (`-` for stdin) or a catalog problem page
    Render {
        file: Option<PathBuf>,

        #[arg(long, conflicts_with = "file")]
        problem: Option<u32>,

        /// Print the parsed document as JSON instead of terminal text
        #[arg(long)]
        json: bool,

        #[arg(long, default_value_t = DEFAULT_RENDER_WIDTH)]
        width: u16,

        /// Print the description below a diagram that failed to render
        #[arg(long)]
        show_source: bool,
    },

    /// Render one diagram description (`-` or no file for stdin)
    Diagram { file: Option<PathBuf> },

    /// Chat with the simulated assistant (`/open [tag]`, `/mode <tag>`, `/copy`, `/clear`,
    /// `/close`, `/quit`)
    Chat {
        /// Context tag to open the session with
        #[arg(long)]
        context: Option<String>,

        /// Reply delay in milliseconds (overrides GILC_REPLY_DELAY_MS)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Show the contextual tips for a page section
    Tips { section: String },

    /// Run the proof assistant over a catalog problem
    Proof { id: u32 },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn read_input(file: Option<&PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn list_problems(category: Option<&str>, search: &str, json: bool) -> Result<(), CliError> {
    let summaries = catalog::filter(category, search);
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    for summary in summaries {
        println!(
            "#{} {} [{}] {} · {} contributors · updated {}",
            summary.id,
            summary.title,
            summary.status,
            summary.tags.join(", "),
            summary.contributors,
            summary.last_update
        );
    }
    Ok(())
}

fn render_content(
    file: Option<&PathBuf>,
    problem: Option<u32>,
    json: bool,
    config: RenderConfig,
) -> Result<(), CliError> {
    let source = match problem {
        Some(id) => catalog::find(id).ok_or(CliError::UnknownProblem(id))?.content.clone(),
        None => read_input(file)?,
    };
    let document = content::render(&source);
    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }
    let renderer = DocumentRenderer::new(DocumentTheme::from_env()?, config);
    println!("{}", renderer.render_plain(&document));
    Ok(())
}

async fn render_one_diagram(description: String) {
    let mut view = DiagramView::spawn(Arc::new(MermaidCompiler), description);
    match view.settled().await {
        DiagramState::Rendered(visual) => println!("{}", visual.text()),
        DiagramState::Errored(message) => println!("{message}"),
        DiagramState::Loading => {}
    }
}

fn print_tips(section: &str) -> Result<(), CliError> {
    let section: PageSection =
        section.parse().map_err(|_| CliError::UnknownSection(section.to_owned()))?;
    for tip in tips_for(section) {
        println!("{}\n  {}\n  → {} ({})", tip.title, tip.description, tip.action, tip.mode.label());
    }
    Ok(())
}

async fn run_proof(id: u32, config: AssistantConfig) -> Result<(), CliError> {
    let problem = catalog::find(id).ok_or(CliError::UnknownProblem(id))?;
    eprintln!("Analyzing proof structure...");
    let analysis = ProofAssistant::new(config.analysis_delay).analyze_problem(problem).await;
    for step in analysis.steps() {
        let mark = if step.is_valid { '✓' } else { '✗' };
        println!("[{mark}] {}. {} ({})", step.id, step.statement, step.justification);
        if !step.dependencies.is_empty() {
            println!("      depends on: {}", step.dependencies.join(", "));
        }
        for suggestion in &step.suggestions {
            println!("      suggestion: {suggestion}");
        }
    }
    println!("{}", analysis.progress());
    Ok(())
}

/// One line of chat input. Anything that is not a known command is sent as a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatCommand<'a> {
    Quit,
    Clear,
    Close,
    Open(Option<&'a str>),
    Mode(&'a str),
    ModeUsage,
    Copy,
    Send(&'a str),
}

impl<'a> ChatCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();
        match command {
            "/quit" => Self::Quit,
            "/clear" => Self::Clear,
            "/close" => Self::Close,
            "/open" => Self::Open((!arg.is_empty()).then_some(arg)),
            "/mode" if arg.is_empty() => Self::ModeUsage,
            "/mode" => Self::Mode(arg),
            "/copy" => Self::Copy,
            _ => Self::Send(line),
        }
    }
}

async fn run_chat(context: Option<String>, config: AssistantConfig) -> Result<(), CliError> {
    let controller = AssistantController::new(config);
    let clipboard = MemoryClipboard::default();
    controller.open(context.as_deref());

    let mut shown = 0usize;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        shown = print_new_messages(&controller, shown);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match ChatCommand::parse(&line) {
            ChatCommand::Quit => break,
            ChatCommand::Clear => {
                controller.clear();
                shown = 0;
            }
            ChatCommand::Close => controller.close(),
            ChatCommand::Open(tag) => controller.open(tag),
            ChatCommand::Mode(tag) => controller.store().set_context(Some(tag.to_owned())),
            ChatCommand::ModeUsage => eprintln!("usage: /mode <tag>"),
            ChatCommand::Copy => copy_last_reply(&controller, &clipboard).await,
            ChatCommand::Send(text) => match controller.send(text) {
                Ok(_) => controller.wait_idle().await,
                Err(err) => eprintln!("{err}"),
            },
        }
    }
    Ok(())
}

async fn copy_last_reply(controller: &AssistantController, clipboard: &MemoryClipboard) {
    let session = controller.snapshot();
    let Some(reply) = session.messages().iter().rev().find(|m| m.role() == Role::Assistant) else {
        eprintln!("nothing to copy");
        return;
    };
    if copy_message(clipboard, &TracingNotifier, reply).await {
        println!("[{COPIED_TITLE}]");
    } else {
        eprintln!("{COPY_FAILED_TITLE}");
    }
}

fn print_new_messages(controller: &AssistantController, shown: usize) -> usize {
    let session = controller.snapshot();
    let messages = session.messages();
    for message in messages.iter().skip(shown) {
        match message.role() {
            Role::User => {}
            Role::System => println!("[{}]", message.body()),
            Role::Assistant => println!("{}\n", message.body()),
        }
    }
    messages.len()
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    match cli.command {
        Command::Problems { category, search, json } => {
            list_problems(category.as_deref(), &search, json)?;
        }
        Command::Render { file, problem, json, width, show_source } => {
            let config = RenderConfig { width, show_diagram_source_on_error: show_source };
            render_content(file.as_ref(), problem, json, config)?;
        }
        Command::Diagram { file } => {
            let description = read_input(file.as_ref())?;
            runtime.block_on(render_one_diagram(description));
        }
        Command::Chat { context, delay_ms } => {
            let mut config = AssistantConfig::from_env()?;
            if let Some(ms) = delay_ms {
                config = config.with_reply_delay(Duration::from_millis(ms));
            }
            runtime.block_on(run_chat(context, config))?;
        }
        Command::Tips { section } => print_tips(&section)?,
        Command::Proof { id } => runtime.block_on(run_proof(id, AssistantConfig::from_env()?))?,
    }

    Ok(())
}
