//! ScanEat MCP Server Implementation
//!
//! Implements the MCP server with all ScanEat tools.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::models::Goal;
use crate::scan::{ScanRequest, Scanner};
use crate::session::Session;
use crate::tools::status::{SessionSnapshot, StatusTracker};
use crate::tools::{insights, meal_log, scan};

/// ScanEat MCP Service
#[derive(Clone)]
pub struct ScanEatService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: Arc<Mutex<Session>>,
    scanner: Arc<Scanner>,
    tool_router: ToolRouter<ScanEatService>,
}

impl ScanEatService {
    pub fn new(scanner: Scanner, classifier_configured: bool) -> Self {
        let fallback_enabled = scanner.resolver().has_fallback();
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                classifier_configured,
                fallback_enabled,
            ))),
            session: Arc::new(Mutex::new(Session::new())),
            scanner: Arc::new(scanner),
            tool_router: Self::tool_router(),
        }
    }

    async fn current_goal(&self, requested: Option<&str>) -> Result<Goal, McpError> {
        match requested {
            Some(goal) => goal
                .parse::<Goal>()
                .map_err(|e| McpError::internal_error(e.to_string(), None)),
            None => Ok(self.session.lock().await.goal()),
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn today() -> NaiveDate {
    now().date()
}

fn json_content<T: Serialize>(value: &T) -> Result<Content, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(Content::text(json))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![json_content(value)?]))
}

fn join_error(e: tokio::task::JoinError) -> McpError {
    McpError::internal_error(format!("Background task failed: {}", e), None)
}

/// Caption plus PNG image for each scanned meal of `day`
fn thumbnail_contents(session: &Session, day: NaiveDate) -> Vec<Content> {
    meal_log::meal_thumbnails(session, day)
        .into_iter()
        .flat_map(|t| [Content::text(t.caption), Content::image(t.png_base64, "image/png")])
        .collect()
}

fn parse_day(date: Option<&str>) -> Result<NaiveDate, McpError> {
    meal_log::parse_date_or(date, today()).map_err(|e| McpError::internal_error(e, None))
}

// ============================================================================
// Goal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetGoalParams {
    /// lose, maintain or gain
    pub goal: String,
}

// ============================================================================
// Scan Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeFoodImageParams {
    /// Path to a JPEG/PNG/WebP file readable by the server
    pub image_path: Option<String>,
    /// Base64 image data (a data: URL prefix is accepted)
    pub image_base64: Option<String>,
    /// Every food on the plate; defaults to the recognized food
    pub selected_items: Option<Vec<String>>,
    #[serde(default = "default_portion")]
    pub portion: f64,
    /// Overrides the session goal for this scan only
    pub goal: Option<String>,
}

fn default_portion() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodNameParams {
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecommendationsParams {
    pub food: String,
    /// Overrides the session goal
    pub goal: Option<String>,
}

// ============================================================================
// Meal Log Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    pub foods: Vec<String>,
    #[serde(default = "default_portion")]
    pub portion: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TodayLogParams {
    /// Also return the photo of each scanned meal
    #[serde(default)]
    pub include_thumbnails: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HistoryParams {
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
    /// Also return the photo of each scanned meal
    #[serde(default)]
    pub include_thumbnails: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateRangeParams {
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportLogCsvParams {
    /// Also write the CSV to this path
    pub file_path: Option<String>,
}

// ============================================================================
// Insights Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WeeklyChartParams {
    /// Last day of the 7-day window (YYYY-MM-DD), defaults to today
    pub end_date: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[tool_router]
impl ScanEatService {
    // --- Status ---

    #[tool(description = "Get the current status of the ScanEat service including build info, session state, and process information")]
    async fn scaneat_status(&self) -> Result<CallToolResult, McpError> {
        let snapshot = {
            let session = self.session.lock().await;
            SessionSnapshot {
                goal: session.goal(),
                meals_logged: session.log().len(),
                has_pending_meal: session.pending_meal().is_some(),
            }
        };
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(snapshot))
    }

    #[tool(description = "Get step-by-step instructions for scanning and logging meals. Call this when starting a session or when unsure how to use the ScanEat tools.")]
    fn scaneat_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::SCANEAT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(SCANEAT_INSTRUCTIONS)]))
    }

    // --- Goal ---

    #[tool(description = "Set the dietary goal for this session: lose, maintain or gain. Affects coaching, recommendations and meals logged from now on.")]
    async fn set_goal(&self, Parameters(p): Parameters<SetGoalParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = meal_log::set_goal(&mut session, &p.goal).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the current dietary goal and its daily calorie band")]
    async fn get_goal(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        json_result(&meal_log::get_goal(&session))
    }

    // --- Scanning ---

    #[tool(description = "Recognize the food in a photo and estimate nutrition for the plate. Provide image_path or image_base64. Optionally list every item on the plate (selected_items) and a portion factor (0.25-2.0). A successful scan can then be logged with log_scanned_meal.")]
    async fn analyze_food_image(&self, Parameters(p): Parameters<AnalyzeFoodImageParams>) -> Result<CallToolResult, McpError> {
        let goal = self.current_goal(p.goal.as_deref()).await?;
        let request = ScanRequest {
            selected_items: p.selected_items,
            portion: p.portion,
            goal,
        };

        let scanner = Arc::clone(&self.scanner);
        let (image_path, image_base64) = (p.image_path, p.image_base64);
        let mut result = tokio::task::spawn_blocking(move || {
            let bytes = scan::read_image_input(image_path.as_deref(), image_base64.as_deref())?;
            scan::analyze_image(&scanner, &bytes, request)
        })
        .await
        .map_err(join_error)?
        .map_err(|e| McpError::internal_error(e, None))?;

        info!(
            "Scanned {} (confidence {:.2}, loggable: {})",
            result.report.recognition.name, result.report.recognition.confidence, result.can_log
        );
        self.session.lock().await.set_pending_meal(result.report.pending.take());
        json_result(&result)
    }

    #[tool(description = "Log the most recent successful scan to today's meal log. Each scan can be logged once.")]
    async fn log_scanned_meal(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = meal_log::log_scanned_meal(&mut session, now()).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Log a meal without a photo: a list of foods plus a portion factor (0.25-2.0). Rejected when none of the foods has nutrition data.")]
    async fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let resolver = self.scanner.resolver().clone();
        let (foods, plate) = tokio::task::spawn_blocking(move || meal_log::prepare_meal(&resolver, &p.foods, p.portion))
            .await
            .map_err(join_error)?
            .map_err(|e| McpError::internal_error(e, None))?;

        let mut session = self.session.lock().await;
        json_result(&meal_log::record_meal(&mut session, foods, plate, now()))
    }

    #[tool(description = "Look up nutrition for one food: curated table first, then Open Food Facts (per 100 g)")]
    async fn resolve_nutrition(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let resolver = self.scanner.resolver().clone();
        let result = tokio::task::spawn_blocking(move || scan::resolve_nutrition(&resolver, &p.name))
            .await
            .map_err(join_error)?
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Goal-based advice and healthier alternatives for one food")]
    async fn get_recommendations(&self, Parameters(p): Parameters<GetRecommendationsParams>) -> Result<CallToolResult, McpError> {
        let goal = self.current_goal(p.goal.as_deref()).await?;
        let resolver = self.scanner.resolver().clone();
        let result = tokio::task::spawn_blocking(move || scan::get_recommendations(&resolver, &p.food, goal))
            .await
            .map_err(join_error)?
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Meal Log ---

    #[tool(description = "Today's nutrition totals and the most recent meals (newest first). Set include_thumbnails to also get each scanned meal's photo.")]
    async fn get_today_log(&self, Parameters(p): Parameters<TodayLogParams>) -> Result<CallToolResult, McpError> {
        let day = today();
        let session = self.session.lock().await;
        let mut content = vec![json_content(&meal_log::get_today_log(&session, day))?];
        if p.include_thumbnails {
            content.extend(thumbnail_contents(&session, day));
        }
        Ok(CallToolResult::success(content))
    }

    #[tool(description = "All meals logged on one day (defaults to today), oldest first. Set include_thumbnails to also get each scanned meal's photo.")]
    async fn get_history(&self, Parameters(p): Parameters<HistoryParams>) -> Result<CallToolResult, McpError> {
        let day = parse_day(p.date.as_deref())?;
        let session = self.session.lock().await;
        let mut content = vec![json_content(&meal_log::get_history(&session, day))?];
        if p.include_thumbnails {
            content.extend(thumbnail_contents(&session, day));
        }
        Ok(CallToolResult::success(content))
    }

    #[tool(description = "All meals logged between two dates (inclusive)")]
    async fn list_entries_between(&self, Parameters(p): Parameters<DateRangeParams>) -> Result<CallToolResult, McpError> {
        let start = parse_day(Some(&p.start_date))?;
        let end = parse_day(Some(&p.end_date))?;
        let session = self.session.lock().await;
        let result = meal_log::list_entries_between(&session, start, end).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Export the whole meal log as CSV text, optionally also writing it to file_path")]
    async fn export_log_csv(&self, Parameters(p): Parameters<ExportLogCsvParams>) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        let result = meal_log::export_log_csv(&session, p.file_path.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Insights ---

    #[tool(description = "Calories per day for the 7 days ending on date (defaults to today), with total, average and top foods")]
    async fn get_weekly_summary(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let end = parse_day(p.date.as_deref())?;
        let session = self.session.lock().await;
        json_result(&insights::get_weekly_summary(&session, end))
    }

    #[tool(description = "Bar chart (PNG) of calories per day for the 7 days ending on end_date")]
    async fn get_weekly_chart(&self, Parameters(p): Parameters<WeeklyChartParams>) -> Result<CallToolResult, McpError> {
        let end = parse_day(p.end_date.as_deref())?;
        let summary = {
            let session = self.session.lock().await;
            crate::insights::weekly_summary(session.log(), end)
        };
        let chart = tokio::task::spawn_blocking(move || insights::render_chart(summary, p.width, p.height))
            .await
            .map_err(join_error)?
            .map_err(|e| McpError::internal_error(e, None))?;

        let caption = format!(
            "Calories from {} to {}: {} kcal total, {:.1} kcal/day on average",
            chart.summary.start, chart.summary.end, chart.summary.total_calories, chart.summary.average_per_day
        );
        Ok(CallToolResult::success(vec![
            Content::image(chart.png_base64, "image/png"),
            Content::text(caption),
        ]))
    }

    #[tool(description = "Coaching for one day's meals (defaults to today) against the current goal")]
    async fn get_coaching(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let day = parse_day(p.date.as_deref())?;
        let session = self.session.lock().await;
        json_result(&insights::get_coaching(&session, day))
    }
}

#[tool_handler]
impl ServerHandler for ScanEatService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "scaneat".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("ScanEat".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "ScanEat - Food photo recognition, nutrition estimates and a session meal log. \
                 IMPORTANT: Call scaneat_instructions first. \
                 Goal: set_goal/get_goal. \
                 Scanning: analyze_food_image, then log_scanned_meal. \
                 Without a photo: log_meal. Lookups: resolve_nutrition, get_recommendations. \
                 Log: get_today_log, get_history, list_entries_between, export_log_csv. \
                 Insights: get_weekly_summary, get_weekly_chart, get_coaching."
                    .into(),
            ),
        }
    }
}
