use pcp_frame::function::FUNCTIONS;

use crate::cmd::FunctionsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_functions, OutputFormat};

pub fn run(args: FunctionsArgs, format: OutputFormat) -> CliResult<i32> {
    let selected = FUNCTIONS
        .iter()
        .filter(|info| args.kind.is_none_or(|kind| kind.matches(info.kind())));

    print_functions(selected, format);
    Ok(SUCCESS)
}
