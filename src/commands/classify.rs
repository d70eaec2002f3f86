use crate::InputArgs;
use crate::format::classify;
use crate::util::read_input;

pub async fn run(args: &InputArgs) -> Result<(), anyhow::Error> {
    let content = read_input(args.file.as_deref())?;
    println!("{}", classify(&content));

    Ok(())
}
