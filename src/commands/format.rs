use crate::FormatArgs;
use crate::config::AppConfig;
use crate::format::{ContentFormatter, TypeHint};
use crate::util::read_input;

pub async fn run(args: &FormatArgs) -> Result<(), anyhow::Error> {
    let config = AppConfig::load_from_arg(args.config_file.as_deref())?;
    let formatter = ContentFormatter::new(&config.markdown, &config.highlight)?;

    let content = read_input(args.file.as_deref())?;
    let hint = TypeHint::from_values(&args.types);

    println!("{}", formatter.format(&content, hint.as_ref()));

    Ok(())
}
