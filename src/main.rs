use std::process::ExitCode;

fn main() -> ExitCode {
    medscan_lib::run()
}
