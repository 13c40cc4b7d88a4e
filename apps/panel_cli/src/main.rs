use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{CompanyDirectory, HttpCompanyDirectory};
use shared::domain::{Cif, Company};

#[derive(Parser, Debug)]
#[command(name = "panel_cli", about = "Inspect and edit the company directory")]
struct Args {
    /// Base URL of the company directory service.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every company in the directory.
    List,
    /// Add a company record.
    Add {
        #[arg(long)]
        company_name: String,
        #[arg(long)]
        cif: String,
        #[arg(long)]
        ebitda_2023: f64,
        #[arg(long)]
        ebitda_source: Option<String>,
        #[arg(long)]
        cif_source: Option<String>,
    },
    /// Look up one company by CIF.
    Search { cif: String },
    /// Replace a company record by CIF.
    Update {
        cif: String,
        #[arg(long)]
        company_name: String,
        #[arg(long)]
        ebitda_2023: f64,
        #[arg(long)]
        ebitda_source: Option<String>,
        #[arg(long)]
        cif_source: Option<String>,
    },
    /// Delete a company by CIF.
    Delete {
        cif: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let client = HttpCompanyDirectory::new(&args.server_url)?;

    match args.command {
        Command::List => {
            for company in client.list_companies().await? {
                println!("{}", company.summary());
            }
        }
        Command::Add {
            company_name,
            cif,
            ebitda_2023,
            ebitda_source,
            cif_source,
        } => {
            let company = Company {
                company_name,
                cif: Cif::new(cif),
                ebitda_2023,
                ebitda_source,
                cif_source,
            };
            client.create_company(&company).await?;
            println!("Company added successfully!");
        }
        Command::Search { cif } => match client.get_company(&Cif::new(cif)).await {
            Ok(company) => {
                println!("Company Name: {}", company.company_name);
                println!("CIF: {}", company.cif);
                println!("EBITDA 2023: {}", company.ebitda_2023);
            }
            Err(err) if err.is_not_found() => println!("Company not found."),
            Err(err) => return Err(err.into()),
        },
        Command::Update {
            cif,
            company_name,
            ebitda_2023,
            ebitda_source,
            cif_source,
        } => {
            let key = Cif::new(cif);
            let company = Company {
                company_name,
                cif: key.clone(),
                ebitda_2023,
                ebitda_source,
                cif_source,
            };
            client.update_company(&key, &company).await?;
            println!("Company updated successfully!");
        }
        Command::Delete { cif, yes } => {
            let cif = Cif::new(cif);
            if !yes && !confirm(&format!("Are you sure you want to delete company {cif}?"))? {
                println!("Aborted.");
                return Ok(());
            }
            client.delete_company(&cif).await?;
            println!("Company deleted successfully!");
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
