use clap::Parser;
use revgeo::geocode::{
    Coordinate, GeocodeError, GeocoderConfig, LookupResult, ReverseGeocoder, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;

/// revgeo: reverse geocoding against Nominatim
///
/// Turns a latitude/longitude pair into road, neighbourhood, suburb,
/// city, state and pincode. Without coordinates, looks up Bangalore.
///
/// Examples:
///   revgeo
///   revgeo 12.9716 77.5946
///   revgeo --detailed -- -33.8688 151.2093
///   revgeo --base-url http://localhost:8080 48.8566 2.3522
///   revgeo --serve --port 3000
#[derive(Parser)]
#[command(name = "revgeo", version, about, long_about = None)]
struct Cli {
    /// Latitude (-90 to 90). Not validated locally.
    #[arg(index = 1, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude (-180 to 180). Not validated locally.
    #[arg(index = 2, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Geocoding service root (the `/reverse` path is appended).
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Identifying User-Agent sent with every request.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds. Unset keeps ureq's 30s connect timeout only.
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the delivery view (street, city, state, pincode, country, formatted).
    #[arg(long)]
    detailed: bool,

    /// Run the HTTP API instead of a single lookup.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for --serve.
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

/// Bangalore, used when no coordinates are given.
const DEMO_COORDINATE: Coordinate = Coordinate { lat: 12.9716, lon: 77.5946 };

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = GeocoderConfig::default()
        .with_base_url(cli.base_url.clone())
        .with_user_agent(cli.user_agent.clone())
        .with_timeout(cli.timeout.map(Duration::from_secs));
    let geocoder = ReverseGeocoder::new(config);

    if cli.serve {
        return serve(&cli, geocoder);
    }

    let coord = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
        _ => DEMO_COORDINATE,
    };
    log::info!("Reverse geocoding {}", coord);

    if cli.detailed {
        report(geocoder.reverse_geocode_detailed(coord.lat, coord.lon))
    } else {
        report(geocoder.lookup(coord))
    }
}

fn report<T: Serialize>(outcome: Result<LookupResult<T>, GeocodeError>) -> ExitCode {
    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot encode result: {}", e);
            return ExitCode::from(1);
        }
    }

    if result.is_found() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn serve(cli: &Cli, geocoder: ReverseGeocoder) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: cannot start runtime: {}", e);
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(revgeo::server::start(&cli.host, cli.port, geocoder)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error on {}:{}: {}", cli.host, cli.port, e);
            ExitCode::from(1)
        }
    }
}
