use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use contact_book::{BookConfig, ContactBook, ContactView, Outcome};
use triple_store::{load_store, save_store, Attribute};

#[derive(Parser)]
#[command(
    name = "contacts",
    version,
    about = "Personal contact book stored as facts in an N3 file"
)]
struct Cli {
    /// Path to the contacts file
    #[arg(long, global = true, env = "CONTACTS_FILE")]
    file: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, global = true, env = "CONTACTS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one contact, or all contacts if no name is given
    Show {
        name: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a contact
    Add { name: String },

    /// Remove a contact and everything stored about it
    Remove { name: String },

    /// Rename a contact
    Rename { from: String, to: String },

    /// Add an email address (creates the contact if needed)
    AddEmail { name: String, email: String },

    /// Remove an email address
    RmEmail { name: String, email: String },

    /// Add a phone number (creates the contact if needed)
    AddPhone { name: String, phone: String },

    /// Remove a phone number
    RmPhone { name: String, phone: String },

    /// Add a gift idea (creates the contact if needed)
    AddGift { name: String, gift: String },

    /// Remove a gift idea
    RmGift { name: String, gift: String },

    /// Tag a contact (creates the contact if needed)
    AddTag { name: String, tag: String },

    /// Remove a tag
    RmTag { name: String, tag: String },

    /// Set the birthday (creates the contact if needed)
    SetBirthday { name: String, birthday: String },

    /// Remove the birthday
    RmBirthday { name: String, birthday: String },

    /// Replace one value: email, phone, birthday, gift, tag or name
    Edit {
        name: String,
        attribute: String,
        from: String,
        to: String,
    },

    /// Mark a gift idea as given
    Gifted { name: String, gift: String },

    /// Remove the given mark from a gift idea
    Ungifted { name: String, gift: String },
}

enum Report {
    Contacts(Vec<ContactView>, bool),
    Outcome(Outcome),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = BookConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let path = cli.file.unwrap_or_else(|| config.contacts_file.clone());
    let codec = config.codec();

    let store = load_store(&path, &codec)?;
    let mut book = ContactBook::with_gifted_marker(store, config.gifted_marker.clone());

    let report = run(&mut book, cli.command)?;

    match report {
        Report::Contacts(contacts, json) => print_contacts(&contacts, json)?,
        Report::Outcome(outcome) => {
            if outcome.is_change() {
                save_store(&path, &book.into_store(), &codec)?;
                info!("saved {}", path.display());
            } else {
                debug!("nothing changed, {} left untouched", path.display());
            }
            println!("{}", outcome);
        }
    }
    Ok(())
}

fn run(book: &mut ContactBook, command: Commands) -> Result<Report> {
    let outcome = match command {
        Commands::Show { name: None, json } => return Ok(Report::Contacts(book.contacts(), json)),
        Commands::Show {
            name: Some(name),
            json,
        } => match book.contact(&name) {
            Some(contact) => return Ok(Report::Contacts(vec![contact], json)),
            None => Outcome::ContactNotFound { name },
        },
        Commands::Add { name } => book.add_contact(&name),
        Commands::Remove { name } => book.remove_contact(&name),
        Commands::Rename { from, to } => book.rename_contact(&from, &to),
        Commands::AddEmail { name, email } => book.add_value(&name, Attribute::Email, &email),
        Commands::RmEmail { name, email } => book.remove_value(&name, Attribute::Email, &email),
        Commands::AddPhone { name, phone } => book.add_value(&name, Attribute::Phone, &phone),
        Commands::RmPhone { name, phone } => book.remove_value(&name, Attribute::Phone, &phone),
        Commands::AddGift { name, gift } => book.add_value(&name, Attribute::GiftIdea, &gift),
        Commands::RmGift { name, gift } => book.remove_value(&name, Attribute::GiftIdea, &gift),
        Commands::AddTag { name, tag } => book.add_value(&name, Attribute::Tag, &tag),
        Commands::RmTag { name, tag } => book.remove_value(&name, Attribute::Tag, &tag),
        Commands::SetBirthday { name, birthday } => {
            book.set_value(&name, Attribute::Birthday, &birthday)
        }
        Commands::RmBirthday { name, birthday } => {
            book.remove_value(&name, Attribute::Birthday, &birthday)
        }
        Commands::Edit {
            name,
            attribute,
            from,
            to,
        } => {
            let attribute = Attribute::from_keyword(&attribute).with_context(|| {
                format!(
                    "unknown attribute `{}` (expected email, phone, birthday, gift, tag or name)",
                    attribute
                )
            })?;
            book.edit_value(&name, attribute, &from, &to)
        }
        Commands::Gifted { name, gift } => book.mark_gifted(&name, &gift),
        Commands::Ungifted { name, gift } => book.unmark_gifted(&name, &gift),
    };
    Ok(Report::Outcome(outcome))
}

fn print_contacts(contacts: &[ContactView], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(contacts)?);
        return Ok(());
    }
    if contacts.is_empty() {
        println!("No contacts.");
    }
    for contact in contacts {
        println!("{}\n", contact);
    }
    Ok(())
}
