use std::io::Write;

use askama::Template;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use todo_board::{
    client::{ClientResult, HttpTodoApi, TodoBoard},
    logging::init_client_tracing,
    ui::{BoardView, Command, CommandError, HELP, confirm_prompt, is_affirmative},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Terminal client for the todo board API")]
struct Cli {
    /// Base URL of the todo server
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Log filter for client diagnostics, written to stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_client_tracing(&cli.log_level);

    let mut board = TodoBoard::new(HttpTodoApi::new(&cli.base_url));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_view(&BoardView::loading(&board))?;
    settle(board.refresh().await);
    print_view(&BoardView::of(&board))?;

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            // A bare Enter redraws, which also drops an expired notice.
            Err(CommandError::Empty) => {
                print_view(&BoardView::of(&board))?;
                continue;
            }
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Add(title) => settle(board.add(&title).await),
            Command::Toggle(id) => settle(board.toggle(id).await),
            Command::Remove(id) => {
                if confirm(&mut lines, &confirm_prompt(id, board.find(id))).await? {
                    settle(board.remove(id).await);
                }
            }
            Command::Refresh => {
                print_view(&BoardView::loading(&board))?;
                settle(board.refresh().await);
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }

        print_view(&BoardView::of(&board))?;
    }

    Ok(())
}

/// The board has already turned a failure into its notice; the error itself
/// only goes to the diagnostic log.
fn settle(result: ClientResult<()>) {
    if let Err(err) = result {
        tracing::debug!(error = %err, "request failed, shown as notice");
    }
}

async fn confirm(lines: &mut Lines<BufReader<Stdin>>, question: &str) -> anyhow::Result<bool> {
    prompt(question)?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(is_affirmative(&answer))
}

fn prompt(text: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

fn print_view(view: &BoardView) -> anyhow::Result<()> {
    println!("{}", view.render()?);
    Ok(())
}
