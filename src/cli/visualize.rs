use std::path::Path;

use crate::{
    aggregate,
    cli::RunOptions,
    error, info,
    management::DatasetManager,
    plot::{self, PlotSeries},
    success,
    types::EnrichedRecord,
};

const TIME_Y_DESC: &str = "songs played (blue) / minutes listened (yellow)";

async fn load_dataset(opts: &RunOptions) -> Vec<EnrichedRecord> {
    let Some(data_file) = opts.data_file.as_ref() else {
        error!("No data file provided (-d)");
    };

    info!("Reading data file");
    match DatasetManager::load(data_file, &opts.filter).await {
        Ok(mgr) => mgr.into_records(),
        Err(e) => error!("Cannot read {}. Err: {}", data_file.display(), e),
    }
}

fn write_plot(path: &Path, y_desc: &str, series: &[PlotSeries]) {
    info!("Creating plot");
    if let Err(e) = plot::render_line_chart(path, y_desc, series) {
        error!("Cannot create plot {}. Err: {}", path.display(), e);
    }
    success!("Plot written to {}", path.display());
}

/// Plots `parameter` for every record, or its daily mean with `by_day`.
pub async fn visualize(opts: &RunOptions, parameter: &str, by_day: bool) {
    let dataset = load_dataset(opts).await;

    let series = if by_day {
        info!("Accumulating data by day");
        match aggregate::daily_feature_means(&dataset, parameter) {
            Ok(points) => PlotSeries::daily(parameter, points),
            Err(e) => error!("{}", e),
        }
    } else {
        match aggregate::feature_timeline(&dataset, parameter) {
            Ok(points) => PlotSeries::new(parameter, points),
            Err(e) => error!("{}", e),
        }
    };

    write_plot(&opts.plot_file, parameter, &[series]);
}

/// Plots the number of plays and the minutes listened per day.
pub async fn visualize_time(opts: &RunOptions) {
    let dataset = load_dataset(opts).await;

    info!("Accumulating data by day");
    let days = aggregate::daily_listening(&dataset);

    let plays = PlotSeries::daily(
        "songs played",
        days.iter().map(|d| (d.date, d.plays as f64)).collect(),
    );
    let minutes = PlotSeries::daily(
        "minutes listened",
        days.iter().map(|d| (d.date, d.minutes)).collect(),
    );

    write_plot(&opts.plot_file, TIME_Y_DESC, &[plays, minutes]);
}
