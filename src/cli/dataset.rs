use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    cli::RunOptions,
    config, error, info,
    management::{DatasetManager, read_history},
    pipeline,
    spotify::{self, HttpTransport, LookupClient},
    success,
};

pub async fn generate_dataset(opts: &RunOptions) {
    let Some(hist_file) = opts.hist_file.as_ref() else {
        error!("No history file provided (-f)");
    };
    let Some(data_file) = opts.data_file.as_ref() else {
        error!("No data file provided (-d)");
    };

    info!("Reading history file");
    let history = match read_history(hist_file, &opts.filter).await {
        Ok(history) => history,
        Err(e) => error!("Cannot read {}. Err: {}", hist_file.display(), e),
    };

    info!("Fetching Spotify API authorization");
    let credentials = match config::resolve_credentials(
        opts.client_id.clone(),
        opts.client_secret.clone(),
    ) {
        Ok(c) => c,
        Err(e) => error!("Missing Spotify credentials. Err: {}", e),
    };

    let http = Client::new();
    let token =
        match spotify::request_access_token(&http, &config::spotify_apitoken_url(), &credentials)
            .await
        {
            Ok(t) => t,
            Err(e) => error!("Failed to obtain access token. Err: {}", e),
        };

    info!("Fetching data");
    let pb = ProgressBar::new(history.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.blue}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let total = history.len();
    let mut client = LookupClient::new(
        HttpTransport::new(http),
        config::spotify_apiurl(),
        &token,
        opts.cache,
    )
    .with_progress(pb.clone());

    let (dataset, report) = match pipeline::enrich(history, &mut client, &pb).await {
        Ok(result) => result,
        Err(e) => {
            pb.abandon();
            error!("Unexpected response: {}", e);
        }
    };
    pb.finish_and_clear();

    if let Some(report) = report {
        info!(
            "Id cache hits: {} ({:.1}%)",
            report.id_hits,
            report.id_hit_rate()
        );
        info!(
            "Data cache hits: {} ({:.1}%)",
            report.feature_hits,
            report.feature_hit_rate()
        );
    }

    info!("Exporting data");
    let dataset_mgr = DatasetManager::new(dataset);
    if let Err(e) = dataset_mgr.persist(data_file).await {
        error!("Cannot write {}. Err: {}", data_file.display(), e);
    }

    success!("Enriched {} of {} records", dataset_mgr.count(), total);
}
