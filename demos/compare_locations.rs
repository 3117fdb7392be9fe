use climate_compare::{
    aggregates_to_frame, load, merge, yearly_aggregates, AnalysisSettings, GreatDayRange,
    Measurement, MergeMode, RollingWindow, Year,
};
use std::env;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    configure_polars_display();
    let dir = tempfile::tempdir()?;
    let ridgefield_csv = write_export(dir.path(), "ridgefield.csv", 0.0)?;
    let portland_csv = write_export(dir.path(), "portland.csv", 4.0)?;

    let ridgefield = load(&ridgefield_csv, "ridgefield")?;
    let portland = load(&portland_csv, "portland")?;
    println!(
        "ridgefield: {} records, portland: {} records",
        ridgefield.len(),
        portland.len()
    );

    let table = merge(&[ridgefield.clone(), portland.clone()], MergeMode::Inner)?;
    println!("{} shared dates", table.len());

    let settings = AnalysisSettings::builder()
        .great_day(GreatDayRange::new(62.0, 78.0)?)
        .rolling(RollingWindow::new(3))
        .build();
    for dataset in [&ridgefield, &portland] {
        let aggregates = yearly_aggregates(dataset, &settings)?;
        println!("{}", aggregates_to_frame(&aggregates)?);
    }

    let long = table.long_format(Measurement::MaxTemperature, Year(2022))?;
    println!("{long}");
    Ok(())
}

/// Writes a small NOAA-style export: the 1st and 15th of every month, 2018 to 2022.
fn write_export(dir: &Path, name: &str, warmer_by: f64) -> std::io::Result<PathBuf> {
    let mut csv = String::from("STATION,NAME,DATE,PRCP,TMAX,TMIN\n");
    for year in 2018..=2022 {
        for month in 1..=12u32 {
            // crude seasonal curve peaking in July
            let season = 30.0 - 5.0 * f64::from(month.abs_diff(7));
            for day in [1, 15] {
                let tmax = 45.0 + season + warmer_by + f64::from(year - 2018);
                let tmin = tmax - 18.0;
                let prcp = if day == 1 { 0.3 } else { 0.0 };
                writeln!(
                    csv,
                    "USC00000001,{name},{year}-{month:02}-{day:02},{prcp},{tmax},{tmin}"
                )
                .map_err(std::io::Error::other)?;
            }
        }
    }
    let path = dir.join(name);
    std::fs::write(&path, csv)?;
    Ok(path)
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
