mod cli;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use shelf_app::{shutdown_signal, App};
use shelf_client::{BooksApi, Controller, Field, HttpBooksApi, Rect, View, Viewport};
use shelf_kernel::settings::Settings;

use cli::{Cli, Command};

/// Terminal sessions are laid out like a desktop browser window.
const TERMINAL_VIEWPORT: (f64, f64) = (1280.0, 800.0);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().context("failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry).context("failed to initialize logging")?;

    match cli.command {
        Command::Serve => {
            let app = App::prepare(settings).await?;
            app.run(shutdown_signal()).await
        }
        Command::Migrate => {
            let app = App::connect(settings).await?;
            let applied = app.migrate().await?;
            println!("applied {} migration(s)", applied);
            Ok(())
        }
        command => {
            let base_url = cli
                .server
                .unwrap_or_else(|| settings.client.base_url.clone());
            let api = HttpBooksApi::new(
                &base_url,
                Duration::from_millis(settings.client.request_timeout_ms),
            )
            .context("failed to build HTTP client")?;
            let mut controller = Controller::new(
                api,
                Viewport::new(TERMINAL_VIEWPORT.0, TERMINAL_VIEWPORT.1),
            );
            controller.load().await;
            run_client(&mut controller, command).await?;
            print_view(&controller.render());
            Ok(())
        }
    }
}

async fn run_client<A: BooksApi>(
    controller: &mut Controller<A>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::List => {}
        Command::Add {
            title,
            author,
            genre,
        } => {
            check(controller)?;
            controller.open_for_create(Rect::default());
            controller.set_field(Field::Title, title);
            controller.set_field(Field::Author, author);
            controller.set_field(Field::Genre, genre);
            controller.submit().await;
        }
        Command::Edit {
            id,
            title,
            author,
            genre,
        } => {
            check(controller)?;
            if !controller.open_for_edit(id, Rect::default()) {
                bail!("Book not found: {}", id);
            }
            for (field, value) in [
                (Field::Title, title),
                (Field::Author, author),
                (Field::Genre, genre),
            ] {
                if let Some(value) = value {
                    controller.set_field(field, value);
                }
            }
            controller.submit().await;
        }
        Command::Delete { id, yes } => {
            check(controller)?;
            controller
                .delete(id, &mut |prompt: &str| yes || ask(prompt))
                .await;
        }
        Command::Serve | Command::Migrate => bail!("serve and migrate do not use a client"),
    }
    check(controller)
}

fn check<A: BooksApi>(controller: &Controller<A>) -> anyhow::Result<()> {
    match controller.error() {
        Some(error) => bail!("{}", error),
        None => Ok(()),
    }
}

fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn print_view(view: &View) {
    match view {
        View::Loading => println!("Loading..."),
        View::Error(error) => println!("Error: {}", error),
        View::Catalog(catalog) if catalog.is_empty() => {
            println!("{}", shelf_client::controller::EMPTY_CATALOG_TEXT)
        }
        View::Catalog(catalog) => {
            println!("{:>5}  {:<32} {:<24} {}", "ID", "TITLE", "AUTHOR", "GENRE");
            for book in &catalog.rows {
                println!(
                    "{:>5}  {:<32} {:<24} {}",
                    book.id, book.title, book.author, book.genre
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shelf_client::ClientError;
    use shelf_contracts::{Book, CreateBookRequest, DeleteBookRequest, Envelope, UpdateBookRequest};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Listing always fails; writes are counted and rejected.
    #[derive(Default)]
    struct FailingList {
        writes: Arc<AtomicUsize>,
    }

    impl FailingList {
        fn write(&self) -> Result<Envelope<Book>, ClientError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(Envelope::failure("write reached the server"))
        }
    }

    #[async_trait]
    impl BooksApi for FailingList {
        async fn list(&self) -> Result<Envelope<Vec<Book>>, ClientError> {
            Ok(Envelope::failure("database is locked"))
        }

        async fn create(&self, _: &CreateBookRequest) -> Result<Envelope<Book>, ClientError> {
            self.write()
        }

        async fn update(&self, _: &UpdateBookRequest) -> Result<Envelope<Book>, ClientError> {
            self.write()
        }

        async fn delete(&self, _: &DeleteBookRequest) -> Result<Envelope<Book>, ClientError> {
            self.write()
        }
    }

    #[tokio::test]
    async fn failed_load_blocks_every_write_command() {
        let commands = [
            Command::Add {
                title: "Dune".into(),
                author: "Herbert".into(),
                genre: "scifi".into(),
            },
            Command::Edit {
                id: 1,
                title: Some("Dune".into()),
                author: None,
                genre: None,
            },
            Command::Delete { id: 1, yes: true },
        ];

        for command in commands {
            let api = FailingList::default();
            let writes = api.writes.clone();
            let mut controller =
                Controller::new(api, Viewport::new(TERMINAL_VIEWPORT.0, TERMINAL_VIEWPORT.1));
            controller.load().await;

            let err = run_client(&mut controller, command).await.unwrap_err();

            assert_eq!(err.to_string(), "database is locked");
            assert_eq!(writes.load(Ordering::SeqCst), 0);
        }
    }
}
