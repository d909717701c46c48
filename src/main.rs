use clap::{command, Arg, ArgAction};
use composer::compose;
use context::Context;
use log::info;
use metadata::PostRequest;
use std::path::PathBuf;

mod composer;
mod context;
mod metadata;
mod renderer;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("file")
                .help("md file name")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
            Arg::new("date")
                .long("date")
                .help("Date of the post (YYYY-MM-DD). Defaults to today."),
            Arg::new("tags")
                .long("tags")
                .action(ArgAction::Append)
                .help("Add a tag to the post. May be repeated."),
            Arg::new("category")
                .long("category")
                .action(ArgAction::Append)
                .help("Add a category to the post. May be repeated."),
            Arg::new("title")
                .long("title")
                .help("Title of the post. Defaults to the first line of the file."),
            Arg::new("remove")
                .long("remove")
                .action(ArgAction::SetTrue)
                .help("Remove the source file after writing the new one."),
        ])
        .get_matches();

    let values = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|v| v.cloned().collect())
            .unwrap_or_default()
    };

    let request = PostRequest {
        file: matches.get_one::<PathBuf>("file").unwrap().to_owned(),
        date: matches.get_one::<String>("date").cloned(),
        title: matches.get_one::<String>("title").cloned(),
        categories: values("category"),
        tags: values("tags"),
        remove: matches.get_flag("remove"),
    };

    let ctx = Context::from_clock()?;
    let outcome = compose(&ctx, &request)?;
    info!("wrote {:?}", outcome.destination);
    if outcome.removed_source {
        info!("removed {:?}", request.file);
    }

    Ok(())
}
