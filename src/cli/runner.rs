//! CLI runner - executes commands

use crate::auth::ApiToken;
use crate::cli::commands::{Cli, Commands, ListArgs, OutputFormat};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::http::{HttpClient, QueryParams, RequestSpec};
use crate::pagination::{FetchPolicy, PaginatedRequest, Paginator, CURSOR_PARAM};
use crate::types::JsonValue;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Get { path, query } => self.get(path, query).await,
            Commands::List(args) => self.list(args).await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load configuration, applying command-line overrides
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
            config.validate()?;
        }

        debug!(base_url = %config.base_url, "Loaded configuration");
        Ok(config)
    }

    /// Resolve the API token
    fn token(&self) -> Result<ApiToken> {
        let key = self
            .cli
            .api_key
            .as_deref()
            .ok_or_else(|| Error::missing_field("api_key (use --api-key or TROCCO_API_KEY)"))?;
        ApiToken::new(key)
    }

    /// Fetch one resource
    async fn get(&self, path: &str, query: &[String]) -> Result<()> {
        let config = self.load_config()?;
        let token = self.token()?;
        let client = HttpClient::with_config(config.http_config())?;

        let url = config.resolve_url(path);
        let spec = RequestSpec::new().query_params(parse_query(query)?);
        let body: JsonValue = client.execute(&url, &token, &spec).await?;

        self.output(&body)
    }

    /// Fetch items from a paginated endpoint
    async fn list(&self, args: &ListArgs) -> Result<()> {
        let config = self.load_config()?;
        let token = self.token()?;
        let request = build_list_request(args, &config)?;
        let paginator = Paginator::new(HttpClient::with_config(config.http_config())?);

        let url = config.resolve_url(&args.path);
        let items: Vec<JsonValue> = paginator.fetch(&url, &token, &request).await?;

        self.output(&JsonValue::Array(items))
    }

    /// Print the effective configuration
    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }

    /// Write a JSON value to stdout
    fn output(&self, value: &JsonValue) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Parse repeated `key=value` arguments
fn parse_query(args: &[String]) -> Result<QueryParams> {
    args.iter()
        .map(|arg| QueryParams::parse_pair(arg))
        .collect::<Result<Vec<_>>>()
        .map(|pairs| pairs.into_iter().collect())
}

/// Turn `list` arguments into a validated paginated request
fn build_list_request(args: &ListArgs, config: &ClientConfig) -> Result<PaginatedRequest> {
    let policy = FetchPolicy::try_from_flags(args.fetch_all, args.count)?;

    let mut query = parse_query(&args.query)?;
    query.set_opt(CURSOR_PARAM, args.cursor.as_deref());

    Ok(PaginatedRequest::new(policy)
        .spec(RequestSpec::new().query_params(query))
        .page_size_ceiling(
            args.page_size_ceiling
                .unwrap_or_else(|| config.page_size_ceiling_for(&args.path)),
        )?
        .max_pages(args.max_pages.or(config.max_pages)))
}
