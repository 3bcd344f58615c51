use std::process::ExitCode;

fn main() -> ExitCode {
    match stackup::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            stackup::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
