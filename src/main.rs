use clap::Parser;
use breadcrumb::cli::{
    handle_add, handle_delete, handle_export, handle_list, handle_search, Cli, Commands,
};
use breadcrumb::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let data_dir = cli.data_dir;
    let result = match cli.command {
        Commands::Add {
            decision,
            context,
            stdin,
            json,
        } => handle_add(data_dir, decision, context, stdin, json),
        Commands::List { json } => handle_list(data_dir, json),
        Commands::Search { query, json } => handle_search(data_dir, query, json),
        Commands::Delete { id } => handle_delete(data_dir, id),
        Commands::Export { format, out } => handle_export(data_dir, format, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
