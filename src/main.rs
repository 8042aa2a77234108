use time_off_server::interface_adapters::password::hash_password;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let mut args = std::env::args().skip(1);

    // `hash-password <password>` prints a PHC string for a `[[managers]]` seed.
    if args.next().as_deref() == Some("hash-password") {
        let Some(password) = args.next() else {
            eprintln!("usage: time_off_server hash-password <password>");
            std::process::exit(2);
        };
        let hash = hash_password(&password).map_err(|e| std::io::Error::other(e.to_string()))?;
        println!("{hash}");
        return Ok(());
    }

    time_off_server::run_with_config().await
}
