//! Scolaris client CLI.
//!
//! Drives the list, search and circulation pipelines from the command line.
//! Rendering here is deliberately thin; all behavior lives in the library.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scolaris_client::{
    api::graphql::ListVariables,
    config::AppConfig,
    listing::PageView,
    models::{Book, BookStatus, CreateIssue, Patron},
    services::{
        catalog::{
            book_category_filter, book_status_filter, book_text_filter, compare_books_by_author,
            compare_books_by_title,
        },
        patrons::{compare_patrons_by_name, patron_class_filter, patron_text_filter, PatronScope},
        search::SearchField,
        site::SiteService,
    },
    AppState,
};

#[derive(Parser)]
#[command(name = "scolaris", version, about = "Scolaris school library client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Catalog operations
    Books {
        #[command(subcommand)]
        command: BookCommand,
    },
    /// Patron operations
    Patrons {
        #[command(subcommand)]
        command: PatronCommand,
    },
    /// Circulation operations
    Issues {
        #[command(subcommand)]
        command: IssueCommand,
    },
    /// Show site configuration and quotes
    Info,
}

#[derive(Subcommand)]
enum BookCommand {
    /// List books with filters, sorting and pagination
    List {
        /// Free-text filter over title, ISBN, accession/call number, author
        #[arg(long)]
        search: Option<String>,
        /// Filter by category id
        #[arg(long)]
        category: Option<String>,
        /// Filter by status (available, issued, reserved, lost, damaged)
        #[arg(long)]
        status: Option<BookStatus>,
        /// Sort key: title or author
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Live search against the remote search endpoint
    Search {
        #[arg(long, default_value = "title")]
        field: SearchField,
        query: String,
    },
    /// Show one book
    Show { id: String },
    /// List new arrivals
    NewArrivals,
    /// List books carrying a tag
    ByTag { tag: String },
    /// List books by author name
    ByAuthor { author: String },
}

#[derive(Subcommand)]
enum PatronCommand {
    /// List members, students or teachers
    List {
        #[arg(long, default_value = "members")]
        scope: PatronScope,
        #[arg(long)]
        search: Option<String>,
        /// Filter students by class
        #[arg(long)]
        class: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show aggregate membership counts
    Counts,
}

#[derive(Subcommand)]
enum IssueCommand {
    /// List circulation records
    List {
        /// Only issues without a recorded return
        #[arg(long)]
        open: bool,
        /// Only open issues past their due date
        #[arg(long)]
        overdue: bool,
    },
    /// Check a book out to a patron
    Checkout {
        #[arg(long)]
        book: String,
        #[arg(long)]
        patron: String,
    },
    /// Record a return
    Return { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("scolaris_client={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(config)?;

    match cli.command {
        Command::Login { username, password } => {
            let session = state.services.auth.login(&username, &password).await?;
            println!("Logged in as {} (valid until {})", session.account, session.expires_at);
        }
        Command::Logout => {
            state.services.auth.logout()?;
            println!("Logged out");
        }
        Command::Books { command } => run_books(&state, command).await?,
        Command::Patrons { command } => run_patrons(&state, command).await?,
        Command::Issues { command } => run_issues(&state, command).await?,
        Command::Info => {
            let site = SiteService::load(state.services.rest()).await?;
            let cfg = &site.configuration;
            println!(
                "{}",
                cfg.library_name
                    .as_deref()
                    .or(cfg.school_name.as_deref())
                    .unwrap_or("Scolaris Library")
            );
            if let Some(address) = &cfg.address {
                println!("  {}", address);
            }
            if let Some(contact) = cfg.email.as_deref().or(cfg.phone.as_deref()) {
                println!("  {}", contact);
            }
            if let Some(announcement) = &cfg.announcement {
                println!("\n{}", announcement);
            }
            for quote in &site.quotes {
                println!("\n\"{}\" - {}", quote.text, quote.author.as_deref().unwrap_or("anonymous"));
            }
        }
    }

    Ok(())
}

async fn run_books(state: &AppState, command: BookCommand) -> anyhow::Result<()> {
    let catalog = &state.services.catalog;
    match command {
        BookCommand::List {
            search,
            category,
            status,
            sort,
            desc,
            page,
        } => {
            let bundle = catalog.load().await?;
            let mut list = bundle.book_list(state.config.lists.books_per_page);
            if let Some(search) = search {
                list.set_filter("text", book_text_filter(&search));
            }
            if let Some(category) = category {
                list.set_filter("category", book_category_filter(&category));
            }
            if let Some(status) = status {
                list.set_filter("status", book_status_filter(status));
            }
            if let Some(sort) = sort {
                match sort.as_str() {
                    "author" => {
                        let lookup = bundle.author_names();
                        list.toggle_sort("author", compare_books_by_author(lookup.clone()));
                        if desc {
                            list.toggle_sort("author", compare_books_by_author(lookup));
                        }
                    }
                    _ => {
                        list.toggle_sort("title", compare_books_by_title);
                        if desc {
                            list.toggle_sort("title", compare_books_by_title);
                        }
                    }
                }
            }
            list.set_page(page);
            print_books(&list.current());
        }
        BookCommand::Search { field, query } => {
            let mut search = state.services.live_search(field);
            search.search(&query).await;
            if let Some(error) = search.error() {
                println!("Search failed: {}", error);
            } else {
                for book in search.results() {
                    print_book_line(book);
                }
                println!("{} result(s)", search.results().len());
            }
        }
        BookCommand::Show { id } => {
            let book = catalog.get_book(&id).await?;
            println!("{}", serde_json::to_string_pretty(&book)?);
        }
        BookCommand::NewArrivals => {
            for book in catalog.new_arrivals().await? {
                print_book_line(&book);
            }
        }
        BookCommand::ByTag { tag } => {
            for book in catalog.books_by_tag(&tag).await? {
                print_book_line(&book);
            }
        }
        BookCommand::ByAuthor { author } => {
            for book in catalog.books_by_author(&author).await? {
                print_book_line(&book);
            }
        }
    }
    Ok(())
}

async fn run_patrons(state: &AppState, command: PatronCommand) -> anyhow::Result<()> {
    let patrons = &state.services.patrons;
    match command {
        PatronCommand::List {
            scope,
            search,
            class,
            page,
        } => {
            let fetched = patrons.list(scope, ListVariables::default()).await?;
            let mut list = patrons.patron_list(fetched, state.config.lists.patrons_per_page);
            if let Some(search) = search {
                list.set_filter("text", patron_text_filter(&search));
            }
            if let Some(class) = class {
                list.set_filter("class", patron_class_filter(&class));
            }
            list.toggle_sort("name", compare_patrons_by_name);
            list.set_page(page);
            print_patrons(&list.current());
        }
        PatronCommand::Counts => {
            let counts = patrons.counts().await?;
            println!(
                "students: {}  teachers: {}  members: {}",
                counts.students, counts.teachers, counts.members
            );
        }
    }
    Ok(())
}

async fn run_issues(state: &AppState, command: IssueCommand) -> anyhow::Result<()> {
    let circulation = &state.services.circulation;
    match command {
        IssueCommand::List { open, overdue } => {
            let issues = if overdue {
                circulation.overdue_issues().await?
            } else if open {
                circulation.open_issues().await?
            } else {
                circulation.list_issues().await?
            };
            for issue in &issues {
                println!(
                    "{}  book={}  patron={}  {}",
                    issue.id,
                    issue.book_id,
                    issue.patron_id,
                    if issue.is_open() { "open" } else { "returned" }
                );
            }
            println!("{} issue(s)", issues.len());
        }
        IssueCommand::Checkout { book, patron } => {
            let issue = circulation
                .checkout(&CreateIssue {
                    book_id: book,
                    patron_id: patron,
                })
                .await?;
            println!("Issued: {}", issue.id);
        }
        IssueCommand::Return { id } => {
            let issue = circulation.return_book(&id).await?;
            println!("Returned: {}", issue.id);
        }
    }
    Ok(())
}

fn print_books(page: &PageView<Book>) {
    for book in &page.items {
        print_book_line(book);
    }
    println!(
        "page {}/{} ({} matching){}{}",
        page.page,
        page.total_pages,
        page.total,
        if page.has_prev() { "  [prev]" } else { "" },
        if page.has_next() { "  [next]" } else { "" },
    );
}

fn print_book_line(book: &Book) {
    println!(
        "{}  {}  [{}]  {}",
        book.id,
        book.title.as_deref().unwrap_or("(untitled)"),
        book.status,
        book.primary_author_name(),
    );
}

fn print_patrons(page: &PageView<Patron>) {
    for patron in &page.items {
        println!(
            "{}  {}  {}  {}",
            patron.id,
            patron.name.as_deref().unwrap_or(""),
            patron.admission_number.as_deref().unwrap_or(""),
            patron.role,
        );
    }
    println!("page {}/{} ({} matching)", page.page, page.total_pages, page.total);
}
