use std::process;

use clap::Parser;

use git_release::cli::{self, Args};
use git_release::ui::Ui;

fn main() {
    let args = Args::parse();
    let ui = Ui::new(args.verbose);

    let outcomes = match cli::run(&args, &ui) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            ui.error(&format!("{:#}", e));
            process::exit(1);
        }
    };

    if outcomes.iter().any(|o| o.failed()) {
        let push_msg = if args.push { "/push" } else { "" };
        ui.error(&format!(
            "at least one tag failed to create{}, see above. exiting...",
            push_msg
        ));
        process::exit(1);
    }
}
