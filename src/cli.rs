use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use comfy_table::Table;

use rucontract::api::{CountriesApi, NewPost, UsersApi};
use rucontract::auth::StaticToken;
use rucontract::config::ContractConfig;
use rucontract::graphql::country_queries;
use rucontract::http::{Response, TransportClient};
use rucontract::meta::{
    COUNTRIES, JsonlSink, MetaRecorder, ReportSink, TestMeta, TracingSink, USERS,
    countries_story, users_story,
};
use rucontract::schema::{Schema, contracts};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 列出 GraphQL 查询注册表，或打印单个组合后的文档
    Queries { name: Option<String> },
    /// 对真实 API 运行正向契约检查
    Check {
        #[arg(value_enum)]
        suite: Suite,
        /// 把元数据事件写入该目录下的 events.jsonl
        #[arg(long)]
        results: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Suite {
    Users,
    Countries,
}

/// 单项检查的结果
struct CheckOutcome {
    name: &'static str,
    status: u16,
    elapsed_ms: u64,
    problems: Vec<String>,
}

impl CheckOutcome {
    fn passed(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn print_queries(name: Option<&str>) -> Result<()> {
    let registry = country_queries();

    if let Some(name) = name {
        println!("{}", registry.document(name)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Operation", "Lines"]);
    for document in registry.iter() {
        let operation = document
            .text()
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        table.add_row(vec![
            document.name().to_string(),
            operation,
            document.text().lines().count().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn run_check(suite: Suite, results: Option<PathBuf>) -> Result<()> {
    let config = ContractConfig::load().context("failed to load configuration")?;
    let sink: Arc<dyn ReportSink> = match results {
        Some(dir) => Arc::new(JsonlSink::new(dir.join("events.jsonl"))),
        None => Arc::new(TracingSink),
    };
    let auth = Arc::new(StaticToken(config.token.clone()));

    let outcomes = match suite {
        Suite::Users => {
            let client = TransportClient::new(&config.rest_base_url).with_auth_source(auth);
            check_users(&UsersApi::new(client), &sink).await?
        }
        Suite::Countries => {
            let client = TransportClient::new(&config.graphql_url).with_auth_source(auth);
            check_countries(&CountriesApi::new(client), &sink).await?
        }
    };

    print_outcomes(&outcomes);

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    if failed > 0 {
        return Err(anyhow!("{} of {} checks failed", failed, outcomes.len()));
    }
    Ok(())
}

/// 检查状态码并按契约校验 body
fn inspect(
    name: &'static str,
    response: &Response,
    elapsed_ms: u64,
    expected_status: u16,
    schema: &Schema,
) -> CheckOutcome {
    let mut problems = Vec::new();
    if response.status() != expected_status {
        problems.push(format!(
            "expected status {}, got {}",
            expected_status, response.status
        ));
    }
    match response.json() {
        Ok(body) => {
            if let Err(violation) = schema.validate(&body) {
                problems.extend(violation.errors().iter().map(ToString::to_string));
            }
        }
        Err(e) => problems.push(format!("body is not JSON: {}", e)),
    }

    CheckOutcome {
        name,
        status: response.status(),
        elapsed_ms,
        problems,
    }
}

async fn timed<F, Fut>(sink: &Arc<dyn ReportSink>, meta: TestMeta, call: F) -> Result<(Response, u64)>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = rucontract::Result<Response>>,
{
    let mut recorder = MetaRecorder::new(sink.clone());
    recorder.set_meta(meta);
    let start = Instant::now();
    let response = call().await?;
    let elapsed = recorder.record_duration(start);
    Ok((response, elapsed))
}

async fn check_users(api: &UsersApi, sink: &Arc<dyn ReportSink>) -> Result<Vec<CheckOutcome>> {
    let mut outcomes = Vec::new();

    let (response, ms) = timed(sink, USERS.story(users_story::LIST), || api.get_users()).await?;
    outcomes.push(inspect("GET /users", &response, ms, 200, &contracts::USERS_LIST));

    let (response, ms) =
        timed(sink, USERS.story(users_story::BY_ID), || api.get_user_by_id(1)).await?;
    outcomes.push(inspect("GET /users/1", &response, ms, 200, &contracts::USER));

    let post = NewPost {
        title: "rucontract check".to_string(),
        body: "Created by contract check".to_string(),
        user_id: 1,
    };
    let (response, ms) =
        timed(sink, USERS.story(users_story::CREATE), || api.create_post(&post)).await?;
    outcomes.push(inspect("POST /posts", &response, ms, 201, &contracts::CREATED_POST));

    let (response, ms) = timed(sink, USERS.story(users_story::AUTH), || {
        api.get_users_without_auth()
    })
    .await?;
    outcomes.push(inspect("GET /users (anonymous)", &response, ms, 200, &Schema::Any));

    Ok(outcomes)
}

async fn check_countries(
    api: &CountriesApi,
    sink: &Arc<dyn ReportSink>,
) -> Result<Vec<CheckOutcome>> {
    let mut outcomes = Vec::new();

    let (response, ms) =
        timed(sink, COUNTRIES.story(countries_story::LIST), || api.get_countries()).await?;
    outcomes.push(inspect("countries", &response, ms, 200, &contracts::COUNTRIES_RESPONSE));

    let (response, ms) = timed(sink, COUNTRIES.story(countries_story::BY_CODE), || {
        api.get_country_by_code("HU")
    })
    .await?;
    outcomes.push(inspect("country(code: HU)", &response, ms, 200, &contracts::COUNTRY_DETAIL));

    let (response, ms) = timed(sink, COUNTRIES.story(countries_story::SCHEMA), || {
        api.send_invalid_query()
    })
    .await?;
    outcomes.push(inspect("invalid syntax", &response, ms, 400, &contracts::GRAPHQL_ERROR));

    Ok(outcomes)
}

fn print_outcomes(outcomes: &[CheckOutcome]) {
    println!();
    for outcome in outcomes {
        let symbol = if outcome.passed() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            " {} {} [{}] ({}ms)",
            symbol,
            outcome.name.cyan(),
            outcome.status,
            outcome.elapsed_ms
        );
        for problem in &outcome.problems {
            println!("     {}", problem.red());
        }
    }

    let passed = outcomes.iter().filter(|o| o.passed()).count();
    println!("\n{}", "━".repeat(50));
    println!(
        "  {}: {} passed, {} failed, {} total",
        "Checks".bold(),
        passed.to_string().green(),
        (outcomes.len() - passed).to_string().red(),
        outcomes.len()
    );
    println!();
}

