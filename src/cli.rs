use crate::config::{self, Config, GeocodingGateway, SentimentGateway};
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use datespot_application::{error::AppError, prelude as flows};
use datespot_core::{
    entities::*,
    gateways::upload::{Asset, AssetUploadGateway},
    usecases::{self, NewSpot, SortBy, ViewParams},
};
use datespot_db_memory::MemoryStore;
use datespot_gateways::{
    http_upload::HttpUpload,
    openai::{NoSentimentAnalysis, OpenAiSentiment},
    opencage::{NoReverseGeocoding, OpenCage},
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::watch;

#[derive(Parser)]
#[command(name = "datespots")]
#[command(about = "Discover, share and vote on date spots")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the spots matching the given criteria
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
        #[arg(long, value_enum, default_value_t = SortArg::Rating)]
        sort: SortArg,
        /// Your position as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng)]
        near: Option<MapPoint>,
    },

    /// Vote on a spot
    Vote {
        spot_id: String,
        /// up, down or remove
        action: VoteAction,
        #[arg(long)]
        user: String,
    },

    /// Rate a spot from 1 to 5 stars
    Rate { spot_id: String, value: i64 },

    /// Submit a new spot
    Add(AddArgs),

    /// Write the sample spots into an empty store
    Seed,
}

#[derive(clap::Args)]
struct AddArgs {
    #[arg(long)]
    user: String,
    #[arg(long)]
    user_name: Option<String>,
    #[arg(long)]
    name: String,
    /// Resolved from the coordinates if empty
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    category: Option<Category>,
    /// From 1 ($) to 4 ($$$$)
    #[arg(long)]
    price: Option<i64>,
    /// Comma separated
    #[arg(long, default_value = "")]
    tags: String,
    /// Your own rating from 1 to 5
    #[arg(long)]
    rating: Option<i64>,
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
    #[arg(long)]
    image_url: Option<String>,
    /// Local image file to upload
    #[arg(long, conflicts_with = "image_url")]
    image: Option<PathBuf>,
    #[arg(long)]
    pet_friendly: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Rating,
    Name,
    CreatedAt,
    Distance,
}

impl From<SortArg> for SortBy {
    fn from(from: SortArg) -> Self {
        match from {
            SortArg::Rating => Self::Rating,
            SortArg::Name => Self::Name,
            SortArg::CreatedAt => Self::CreatedAt,
            SortArg::Distance => Self::Distance,
        }
    }
}

fn parse_lat_lng(s: &str) -> std::result::Result<MapPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| "expected LAT,LNG".to_string())?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude '{lat}'"))?;
    let lng: f64 = lng.trim().parse().map_err(|_| format!("invalid longitude '{lng}'"))?;
    MapPoint::try_from_lat_lng_deg(lat, lng).ok_or_else(|| format!("{s} is not a valid position"))
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::try_load_from_file_or_default(cli.config.as_ref())?;
    let db = Arc::new(open_store(&cfg.store)?);
    let timeout = cfg.remote.timeout;

    if cfg.store.seed_sample_data && !matches!(cli.command, Commands::Seed) {
        flows::seed_sample_data(&*db, timeout).await?;
    }

    match cli.command {
        Commands::List {
            search,
            category,
            min_rating,
            sort,
            near,
        } => {
            let feed = flows::SpotFeed::start(&*db);
            let state = feed.loaded().await;
            if let Some(err) = state.error {
                bail!(err);
            }
            let params = ViewParams {
                search_term: search.unwrap_or_default(),
                category,
                min_rating,
                sort_by: sort.into(),
                user_location: near,
            };
            let spots = usecases::derive_view(&state.spots, &params);
            if spots.is_empty() {
                println!("No date spots found");
            }
            for spot in &spots {
                print_spot(spot, near);
            }
        }
        Commands::Vote {
            spot_id,
            action,
            user,
        } => {
            let mut session = flows::Session::new(db.clone());
            session.sign_in(User::new(user)).await;
            session.votes_loaded().await;
            let res =
                flows::cast_vote(&*db, &session, &spot_id.into(), action, timeout).await;
            session.sign_out().await;
            let outcome = res.map_err(report)?;
            match outcome.counts {
                Some(counts) => println!(
                    "{:?}: {} up, {} down (net {})",
                    outcome.transition,
                    counts.upvotes,
                    counts.downvotes,
                    counts.net()
                ),
                None => println!("Nothing to remove"),
            }
        }
        Commands::Rate { spot_id, value } => {
            let summary = flows::rate_spot(&*db, &spot_id, value, timeout)
                .await
                .map_err(report)?;
            println!(
                "Rated {value}: now {:.1} stars from {} ratings",
                f64::from(summary.rating),
                summary.total_votes
            );
        }
        Commands::Add(args) => {
            let flow_config = flows::FlowConfig {
                timeout,
                gate: cfg.gate,
            };
            let services = spot_services(&cfg);
            let user = User {
                display_name: args.user_name.clone(),
                ..User::new(args.user.as_str())
            };
            let image = args.image.as_deref().map(read_image).transpose()?;
            let new_spot = new_spot(args)?;
            let (progress, progress_rx) = watch::channel(None);
            let progress_task = tokio::spawn(log_upload_progress(progress_rx));
            let res = flows::create_spot(
                &*db,
                &services,
                &flow_config,
                Some(&user),
                new_spot,
                image,
                &progress,
            )
            .await;
            drop(progress);
            let _ = progress_task.await;
            let spot = res.map_err(report)?;
            println!("Created date spot {}", spot.id);
            print_spot(&spot, None);
        }
        Commands::Seed => {
            let created = flows::seed_sample_data(&*db, timeout).await?;
            println!("Created {created} sample spots");
        }
    }
    Ok(())
}

fn report(err: AppError) -> anyhow::Error {
    if err.is_retryable() {
        warn!("The action failed temporarily, please try again");
    }
    err.into()
}

fn open_store(cfg: &config::Store) -> Result<MemoryStore> {
    match &cfg.snapshot_file {
        Some(path) => {
            info!("Loading date spots from {}", path.display());
            MemoryStore::open(path)
        }
        None => {
            warn!("No snapshot file configured, changes will be lost");
            Ok(MemoryStore::new())
        }
    }
}

fn spot_services(cfg: &Config) -> flows::SpotServices {
    let sentiment: Arc<dyn datespot_core::gateways::sentiment::SentimentGateway> =
        match &cfg.sentiment.gateway {
            Some(SentimentGateway::OpenAi {
                api_key,
                model,
                base_url,
            }) => {
                let mut gw = OpenAiSentiment::new(api_key);
                if let Some(model) = model {
                    gw = gw.with_model(model);
                }
                if let Some(url) = base_url {
                    gw = gw.with_base_url(url);
                }
                Arc::new(gw)
            }
            None => Arc::new(NoSentimentAnalysis),
        };
    let geocoding: Arc<dyn datespot_core::gateways::geocode::ReverseGeocodingGateway> =
        match &cfg.geocoding.gateway {
            Some(GeocodingGateway::OpenCage { api_key }) => Arc::new(OpenCage::new(api_key)),
            None => Arc::new(NoReverseGeocoding),
        };
    let upload = cfg
        .upload
        .endpoint
        .as_ref()
        .map(|url| Arc::new(HttpUpload::new(url)) as Arc<dyn AssetUploadGateway>);
    flows::SpotServices {
        sentiment,
        geocoding,
        upload,
    }
}

fn new_spot(args: AddArgs) -> Result<NewSpot> {
    let AddArgs {
        name,
        location,
        description,
        category,
        price,
        tags,
        rating,
        lat,
        lng,
        image_url,
        pet_friendly,
        ..
    } = args;
    let price_level = price
        .map(PriceLevel::try_from)
        .transpose()
        .map_err(|_| anyhow!("The price level must be within 1 and 4"))?
        .unwrap_or(PriceLevel::default());
    let initial_rating = rating
        .map(RatingValue::try_from)
        .transpose()
        .map_err(|_| anyhow!("The rating must be within 1 and 5"))?;
    let coordinates = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(
            MapPoint::try_from_lat_lng_deg(lat, lng)
                .ok_or_else(|| anyhow!("{lat},{lng} is not a valid position"))?,
        ),
        _ => None,
    };
    Ok(NewSpot {
        name,
        location,
        description,
        category: category.unwrap_or(Category::default()),
        price_level,
        tags: usecases::parse_tag_list(&tags),
        image_url,
        coordinates,
        pet_friendly,
        initial_rating,
    })
}

fn read_image(path: &Path) -> Result<Asset> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid image file name: {}", path.display()))?
        .to_owned();
    let content_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("png") => Some("image/png"),
        Some("webp") => Some("image/webp"),
        Some("gif") => Some("image/gif"),
        _ => None,
    };
    Ok(Asset {
        file_name,
        content_type: content_type.map(ToOwned::to_owned),
        bytes,
    })
}

async fn log_upload_progress(mut progress: watch::Receiver<Option<f64>>) {
    while progress.changed().await.is_ok() {
        if let Some(fraction) = *progress.borrow_and_update() {
            info!("Uploading image: {:.0}%", fraction * 100.0);
        }
    }
}

fn print_spot(spot: &Spot, near: Option<MapPoint>) {
    let distance = near
        .zip(spot.coordinates)
        .map(|(from, to)| format!("  {:.1} km", from.distance_km(to)))
        .unwrap_or_default();
    println!(
        "{}  {} ({})  {}  {}  {:.1}★ ({})  +{} -{}{}",
        spot.id,
        spot.name,
        spot.location,
        spot.category.label(),
        spot.price_level.display(),
        f64::from(spot.rating),
        spot.total_votes,
        spot.upvotes,
        spot.downvotes,
        distance
    );
}
