use quarkhub::openapi::client_openapi;

fn main() -> eyre::Result<()> {
    println!("{}", client_openapi().to_pretty_json()?);
    Ok(())
}
