use brasa::cli::run;

#[tokio::main]
async fn main() {
    // No-op outside Windows; enables ANSI escape handling there
    let _ = enable_ansi_support::enable_ansi_support();
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        let mut causes = e.chain().skip(1).peekable();
        if causes.peek().is_some() {
            eprintln!("\nCaused by:");
            let mut indent = 1;
            for err in causes {
                eprintln!("{:indent$}  {}", "", err);
                indent += 1;
            }
        }
        std::process::exit(1);
    }
}
