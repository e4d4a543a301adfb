use clap::Parser;
use url::Url;

use cors_shim::probe::{self, standard_cases, Credentials, ProbeTarget, RowUpdate, DEFAULT_API_BASE};

#[derive(Parser)]
#[command(name = "api-probe")]
#[command(about = "Probe which HAP-AppKey header casing the worksheet API accepts", long_about = None)]
struct Cli {
    #[arg(long, env = "HAP_BASE_URL", default_value = DEFAULT_API_BASE)]
    base_url: Url,

    #[arg(long, env = "HAP_APPKEY", hide_env_values = true)]
    app_key: String,

    #[arg(long, env = "HAP_SIGN", hide_env_values = true)]
    sign: String,

    #[arg(long, env = "HAP_WORKSHEET_ID")]
    worksheet_id: String,

    #[arg(long, env = "HAP_ROW_ID")]
    row_id: String,

    /// Field written by the update payload.
    #[arg(long, env = "HAP_FIELD_ID")]
    field_id: String,

    #[arg(long, default_value = "TestOverload")]
    field_value: String,

    /// Also send each probe with credentials in the query string.
    #[arg(long)]
    query_auth: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let target = ProbeTarget {
        base: cli.base_url,
        worksheet_id: cli.worksheet_id,
        row_id: cli.row_id,
    };
    let credentials = Credentials {
        app_key: cli.app_key,
        sign: cli.sign,
    };
    let payload = RowUpdate::single_field(&target.row_id, &cli.field_id, &cli.field_value);

    for case in standard_cases(&target, cli.query_auth)? {
        println!("\n--- {} {} ---", case.name, case.url);
        match probe::run_case(&client, &case, &credentials, &payload).await {
            Ok(outcome) => {
                println!("Status: {}", outcome.status.as_u16());
                println!("Resp: {}", outcome.preview());
            }
            Err(e) => println!("Err: {}", e),
        }
    }

    Ok(())
}
