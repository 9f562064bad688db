//! Section Field HTTP Server

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use section_field::prelude::*;

const DEFAULT_ADDR: &str = "0.0.0.0:8087";
const MAX_SUBINTERVALS: usize = 1024;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Two boundary sections plus optional pairing and weight laws
#[derive(Debug, Deserialize)]
struct FieldData {
    start: Section,
    end: Section,
    /// Explicit `(start name, end name)` pairs; positional pairing when absent
    #[serde(default)]
    pairs: Option<Vec<(String, String)>>,
    #[serde(default)]
    weight_laws: Vec<String>,
}

impl FieldData {
    fn build(self) -> SectionResult<ContinuousSectionField> {
        let mut field = match &self.pairs {
            Some(pairs) => {
                let names: Vec<(&str, &str)> = pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
                ContinuousSectionField::with_name_pairs(self.start, self.end, &names)?
            }
            None => ContinuousSectionField::new(self.start, self.end)?,
        };
        if !self.weight_laws.is_empty() {
            let laws = WeightLawTable::parse(&self.weight_laws)?;
            // Tables are read from the server's filesystem
            if let Some(path) = laws.iter().flat_map(|law| law.lookup_paths()).next() {
                return Err(SectionError::InvalidInput(format!(
                    "lookup('{path}') is not available over HTTP"
                )));
            }
            field.set_weight_law_table(laws)?;
        }
        Ok(field)
    }
}

/// Reject quadrature requests larger than the server is willing to evaluate
fn check_quadrature(spec: &QuadratureSpec) -> SectionResult<()> {
    if spec.subintervals > MAX_SUBINTERVALS {
        return Err(SectionError::InvalidInput(format!(
            "at most {MAX_SUBINTERVALS} subintervals are accepted, got {}",
            spec.subintervals
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SectionRequest {
    field: FieldData,
    z: f64,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    field: FieldData,
    /// Stations to analyze; both field ends when empty
    #[serde(default)]
    stations: Vec<f64>,
    /// Additional shear cuts evaluated at every station
    #[serde(default)]
    y_cuts: Vec<f64>,
    #[serde(default)]
    options: AnalysisOptions,
}

#[derive(Debug, Deserialize)]
struct VolumeRequest {
    field: FieldData,
    #[serde(default)]
    quadrature: QuadratureSpec,
    #[serde(default)]
    options: AnalysisOptions,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<T>,
}

#[derive(Debug, Serialize)]
struct StationResult {
    #[serde(flatten)]
    analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    statical_moments: Vec<CutResult>,
}

#[derive(Debug, Serialize)]
struct CutResult {
    y_cut: f64,
    q: f64,
}

#[derive(Debug, Serialize)]
struct VolumeResult {
    z0: f64,
    z1: f64,
    volume: f64,
}

fn respond<T: Serialize>(outcome: SectionResult<T>) -> (StatusCode, Json<ApiResponse<T>>) {
    match outcome {
        Ok(results) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            log::warn!("Request rejected: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn section(Json(request): Json<SectionRequest>) -> impl IntoResponse {
    respond(request.field.build().and_then(|field| field.section(request.z)))
}

async fn analyze(Json(request): Json<AnalyzeRequest>) -> impl IntoResponse {
    respond(run_analysis(request))
}

async fn volume(Json(request): Json<VolumeRequest>) -> impl IntoResponse {
    respond(run_volume(request))
}

fn run_analysis(request: AnalyzeRequest) -> SectionResult<Vec<StationResult>> {
    let field = request.field.build()?;
    let stations = if request.stations.is_empty() {
        vec![field.z0(), field.z1()]
    } else {
        request.stations
    };

    stations
        .into_iter()
        .map(|z| {
            let section = field.section(z)?;
            let analysis = full_analysis(&section, &request.options)?;
            let statical_moments = request
                .y_cuts
                .iter()
                .map(|&y_cut| {
                    Ok(CutResult {
                        y_cut,
                        q: statical_moment(&section, y_cut, &request.options)?,
                    })
                })
                .collect::<SectionResult<Vec<_>>>()?;
            Ok(StationResult {
                analysis,
                statical_moments,
            })
        })
        .collect()
}

fn run_volume(request: VolumeRequest) -> SectionResult<VolumeResult> {
    check_quadrature(&request.quadrature)?;
    let field = request.field.build()?;
    let volume = integrate_volume(&field, &request.quadrature, &request.options)?;
    Ok(VolumeResult {
        z0: field.z0(),
        z1: field.z1(),
        volume,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/section", post(section))
        .route("/api/v1/analyze", post(analyze))
        .route("/api/v1/volume", post(volume))
        .layer(cors);

    let addr: SocketAddr = std::env::var("SECTION_FIELD_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    println!("Section Field Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Section:      POST /api/v1/section");
    println!("  Analysis:     POST /api/v1/analyze");
    println!("  Volume:       POST /api/v1/volume");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
