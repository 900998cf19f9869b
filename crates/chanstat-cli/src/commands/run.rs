use anyhow::Result;
use chanstat_browser::{BrowserSession, ChannelStats, SessionOptions};
use chanstat_core::RunCounters;
use chanstat_core::params::{CHANNELS_PARAMETER, channels_from_parameters};
use chanstat_core::runlog::{RUN_LOG_FILE, RunLog};
use chanstat_maestro::{AlertType, MaestroClient};
use chrono::Local;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fixed filename for error screenshots; each failure overwrites it.
const SCREENSHOT_FILE: &str = "erro.png";

/// Structured log on the platform receiving one row per collected channel.
const ACTIVITY_LABEL: &str = "EstatisticasYoutube";

pub struct RunArgs {
    pub server: Option<String>,
    pub task_id: String,
    pub token: String,
    pub canais: Option<String>,
    pub headed: bool,
    pub chrome_path: Option<PathBuf>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(args));

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

async fn run(args: RunArgs) -> Result<()> {
    let maestro = match &args.server {
        Some(server) => MaestroClient::new(server, &args.token)?,
        None => MaestroClient::disconnected(),
    };

    let mut execution = maestro.get_execution(&args.task_id).await?;
    if let Some(raw) = args.canais {
        execution
            .parameters
            .insert(CHANNELS_PARAMETER.to_string(), raw);
    }

    // Startup failures are not caught: a run without channels aborts here
    let canais = channels_from_parameters(&execution.parameters)?;

    println!("Task ID is: {}", execution.task_id);
    println!("Task Parameters are: {:?}", execution.parameters);

    let mut runlog = RunLog::open(RUN_LOG_FILE)?;
    let mut counters = RunCounters::new(canais.len());

    if let Err(e) = maestro
        .alert(
            &execution.task_id,
            "BotYoutube - Inicio",
            "Estamos iniciando o processo",
            AlertType::Info,
        )
        .await
    {
        tracing::warn!("Failed to send start alert: {}", e);
    }

    let options = SessionOptions {
        chrome_path: args.chrome_path,
        headless: !args.headed,
    };

    println!("🚀 Processando {} canais...", counters.total());

    for canal in &canais {
        collect_channel(
            &maestro,
            &execution.task_id,
            &options,
            canal,
            &mut runlog,
            &mut counters,
        )
        .await;
    }

    let status = counters.finish_status();
    let message = counters.finish_message();

    log_info(&mut runlog, "Execução finalizada.");
    log_info(
        &mut runlog,
        &format!(
            "Total canais: {} | Canais com sucesso: {} | Canais com falha: {}",
            counters.total(),
            counters.succeeded(),
            counters.failed()
        ),
    );

    // The log artifact goes up regardless of outcome
    let artifact_name = RunLog::artifact_name(&execution.task_id);
    if let Err(e) = maestro
        .post_artifact(&execution.task_id, &artifact_name, runlog.path())
        .await
    {
        tracing::warn!("Failed to upload log artifact: {}", e);
    }

    maestro
        .finish_task(
            &execution.task_id,
            status,
            &message,
            counters.total(),
            counters.succeeded(),
            counters.failed(),
        )
        .await?;

    println!("✅ {} [{}]", message, status);

    Ok(())
}

/// Attempt one channel end to end.
///
/// Any failure, from browser launch through the platform log entry, is
/// folded into the failure counter and the loop moves on. The browser
/// teardown at the end runs once per channel no matter which branch was
/// taken.
async fn collect_channel(
    maestro: &MaestroClient,
    task_id: &str,
    options: &SessionOptions,
    canal: &str,
    runlog: &mut RunLog,
    counters: &mut RunCounters,
) {
    log_info(
        runlog,
        &format!("Iniciando coleta de dados do canal: {}", canal),
    );

    let mut session = match BrowserSession::launch(options).await {
        Ok(session) => session,
        Err(e) => {
            // No session yet, so nothing to screenshot
            record_channel_failure(maestro, task_id, canal, &e.to_string(), None, runlog, counters)
                .await;
            return;
        }
    };

    match collect_and_publish(maestro, &mut session, canal).await {
        Ok(stats) => {
            counters.record_success();
            log_info(
                runlog,
                &format!(
                    "Canal: {} | Inscritos: {} | Vídeos: {}",
                    stats.name, stats.subscribers, stats.videos
                ),
            );
            println!(
                "  ✅ {} | {} | {}",
                stats.name, stats.subscribers, stats.videos
            );
        }
        Err(e) => {
            // The session is still alive whichever step failed, so every
            // failure gets a screenshot attempt before the report goes out
            let screenshot = match session.save_screenshot(SCREENSHOT_FILE).await {
                Ok(()) => Some(Path::new(SCREENSHOT_FILE)),
                Err(shot_err) => {
                    tracing::warn!("Failed to capture error screenshot: {}", shot_err);
                    None
                }
            };
            record_channel_failure(
                maestro,
                task_id,
                canal,
                &e.to_string(),
                screenshot,
                runlog,
                counters,
            )
            .await;
        }
    }

    session.shutdown().await;
}

/// Scrape the channel page and publish its row to the platform log.
/// Failing either step fails the channel.
async fn collect_and_publish(
    maestro: &MaestroClient,
    session: &mut BrowserSession,
    canal: &str,
) -> Result<ChannelStats> {
    let stats = session.collect(canal).await?;

    let mut values = HashMap::new();
    values.insert("canal".to_string(), stats.name.clone());
    values.insert(
        "data_hora".to_string(),
        Local::now().format("%Y-%m-%d_%H-%M").to_string(),
    );
    values.insert("inscritos".to_string(), stats.subscribers.clone());
    maestro.new_log_entry(ACTIVITY_LABEL, &values).await?;

    Ok(stats)
}

async fn record_channel_failure(
    maestro: &MaestroClient,
    task_id: &str,
    canal: &str,
    message: &str,
    screenshot: Option<&Path>,
    runlog: &mut RunLog,
    counters: &mut RunCounters,
) {
    counters.record_failure();
    log_error(
        runlog,
        &format!("Erro ao coletar dados do canal {}: {}", canal, message),
    );
    println!("  ❌ {}: {}", canal, message);

    let mut tags = HashMap::new();
    tags.insert("canal".to_string(), canal.to_string());
    if let Err(e) = maestro
        .report_error(task_id, message, &tags, screenshot)
        .await
    {
        tracing::warn!("Failed to report error for canal {}: {}", canal, e);
    }
}

/// Run-log writes are best effort once the run is underway: a failing disk
/// must not keep the task from finishing on the platform.
fn log_info(runlog: &mut RunLog, message: &str) {
    if let Err(e) = runlog.info(message) {
        tracing::warn!("Run log write failed: {}", e);
    }
}

fn log_error(runlog: &mut RunLog, message: &str) {
    if let Err(e) = runlog.error(message) {
        tracing::warn!("Run log write failed: {}", e);
    }
}
