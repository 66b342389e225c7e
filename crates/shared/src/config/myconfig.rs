use anyhow::{Context, Result, anyhow};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct InitialUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub initial_user: Option<InitialUser>,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let port = match std::env::var("PORT") {
            Ok(port_str) => port_str
                .parse::<u16>()
                .context("PORT must be a valid u16 integer")?,
            Err(_) => DEFAULT_PORT,
        };

        let bcrypt_cost = match std::env::var("BCRYPT_COST") {
            Ok(cost_str) => {
                let cost = cost_str
                    .parse::<u32>()
                    .context("BCRYPT_COST must be a valid integer")?;
                if !(4..=31).contains(&cost) {
                    return Err(anyhow!("BCRYPT_COST must be between 4 and 31, got {cost}"));
                }
                cost
            }
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        let initial_user = match (
            std::env::var("INITIAL_ADMIN_USERNAME"),
            std::env::var("INITIAL_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(InitialUser { username, password })
            }
            (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
                return Err(anyhow!(
                    "INITIAL_ADMIN_USERNAME and INITIAL_ADMIN_PASSWORD must be set together"
                ));
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            bcrypt_cost,
            initial_user,
        })
    }

    /// Settings for the `migrate` binary, which only needs the store location.
    pub fn database_url() -> Result<String> {
        std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")
    }
}
