use anyhow::anyhow;

use crate::CssArgs;
use crate::config::AppConfig;
use crate::format::SyntaxHighlighter;

pub async fn run(args: &CssArgs) -> Result<(), anyhow::Error> {
    let theme = match &args.theme {
        Some(theme) => theme.clone(),
        None => AppConfig::load_from_arg(args.config_file.as_deref())?.highlight.theme,
    };

    let css = SyntaxHighlighter::new(&theme)
        .generate_css()
        .ok_or_else(|| anyhow!("unknown highlight theme '{theme}'"))?;
    print!("{css}");

    Ok(())
}
