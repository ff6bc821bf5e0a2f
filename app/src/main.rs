mod command;
mod render;

use anyhow::Result;
use command::Command;
use pdf_qa_client::{ApiService, ClientConfig, ClientError, Controller, SelectedFile};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let mut config = ClientConfig::from_env()?;
    if let Some(api_base) = std::env::args().nth(1) {
        config = config.with_api_base(api_base);
    }

    let api = Arc::new(ApiService::new(&config)?);
    log::info!("Using backend at {}", api.api_base());

    let mut controller = Controller::new(api);
    let renderer = tokio::spawn(render::run(controller.subscribe()));

    println!("PDF Q&A client. Type \"help\" for commands.");
    print!("{}", render::render(controller.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        dispatch(&mut controller, command).await;
    }

    drop(controller);
    renderer.await?;
    Ok(())
}

async fn dispatch(controller: &mut Controller, command: Command) {
    let outcome = match command {
        Command::Open(path) => {
            let file = match path {
                Some(path) => match SelectedFile::from_path(&path).await {
                    Ok(file) => Some(file),
                    Err(e) => {
                        println!("{e:#}");
                        return;
                    }
                },
                None => None,
            };
            controller.select_file(file)
        }
        Command::Upload => controller.upload().await.map(|_| ()),
        Command::Question(text) => controller.set_question(text),
        Command::Ask(text) => {
            // Before an upload the input is disabled; ask still explains why.
            if let Some(text) = text.filter(|_| controller.state().controls().question_input) {
                if let Err(e) = controller.set_question(text) {
                    report(e);
                    return;
                }
            }
            controller.ask().await.map(|_| ())
        }
        Command::Health => controller.health().await.map(|_| ()),
        Command::Status => {
            print!("{}", render::render(controller.state()));
            Ok(())
        }
        Command::Help => {
            println!("{}", command::HELP);
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    if let Err(e) = outcome {
        report(e);
    }
}

fn report(error: ClientError) {
    match error {
        // These never reached the screen state, so say them here.
        ClientError::Busy | ClientError::Disabled(_) => println!("{error}"),
        other => log::debug!("Operation ended with: {}", other),
    }
}
