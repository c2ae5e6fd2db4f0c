use std::process;

fn main() {
    env_logger::init();
    match markdown_publish_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("markdown-publish error: {err:#}");
            process::exit(1);
        }
    }
}
