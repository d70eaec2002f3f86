use crate::InputArgs;
use crate::format::reduce_to_markdown;
use crate::util::read_input;

pub async fn run(args: &InputArgs) -> Result<(), anyhow::Error> {
    let html = read_input(args.file.as_deref())?;
    println!("{}", reduce_to_markdown(&html));

    Ok(())
}
