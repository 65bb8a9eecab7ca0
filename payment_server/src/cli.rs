use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Never list MERCADOPAGO_ACCESS_TOKEN here
    const DISPLAY_ENVS: [&str; 13] = [
        "RUST_LOG",
        "PAYMENT_HOST",
        "PAYMENT_PORT",
        "PAYMENT_DATABASE_URL",
        "PAYMENT_ESCALATE_RECONCILE_FAILURES",
        "PAYMENT_FOLLOW_MERCHANT_ORDERS",
        "MERCADOPAGO_BASE_URL",
        "MERCADOPAGO_NOTIFICATION_URL",
        "MERCADOPAGO_COLLECTOR_ID",
        "MERCADOPAGO_POS_ID",
        "MERCADOPAGO_TIMEOUT_SECS",
        "ORDER_SERVICE_URL",
        "ORDER_SERVICE_TIMEOUT_SECS",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<38} {val:<15}");
    })
}
