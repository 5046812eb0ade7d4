use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::models::{
    CategoryCountRow, ModelCountRow, PeriodCountRow, RegionCountRow, SalesCountRow, Transcript,
};
use crate::pipeline;
use crate::timeframe::TimeFilter;

const ENQUIRIES: &str = "enquiry_details";
const TRANSCRIPTS: &str = "transcript_details";

/// Flat cap on the transcript listing.
const TRANSCRIPT_LIMIT: i64 = 50;

/// Read-only adapter over the enquiry document store.
///
/// Owns the MongoDB client for its whole lifecycle: opened once at startup,
/// shared by every request, closed explicitly at shutdown.
pub struct EnquiryStore {
    client: Client,
    db: Database,
}

impl EnquiryStore {
    /// Connects to the store and pings it, so an unreachable server fails at
    /// startup rather than on the first request.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }).await?;
        Ok(Self { client, db })
    }

    /// Shuts the underlying client down. Call once at process shutdown.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
    }

    fn enquiries(&self) -> Collection<Document> {
        self.db.collection(ENQUIRIES)
    }

    /// Enquiry counts per day (or per month under a year filter).
    pub async fn daily_enquiries(
        &self,
        filter: &TimeFilter,
    ) -> Result<Vec<PeriodCountRow>, AppError> {
        self.aggregate(pipeline::daily_enquiries(filter)).await
    }

    /// Enquiry counts per interested model.
    pub async fn model_breakdown(
        &self,
        filter: &TimeFilter,
    ) -> Result<Vec<ModelCountRow>, AppError> {
        self.aggregate(pipeline::model_breakdown(filter)).await
    }

    /// Enquiry counts per region.
    pub async fn region_leaderboard(
        &self,
        filter: &TimeFilter,
    ) -> Result<Vec<RegionCountRow>, AppError> {
        self.aggregate(pipeline::region_leaderboard(filter)).await
    }

    /// Enquiry counts per catalog category.
    pub async fn category_breakdown(
        &self,
        filter: &TimeFilter,
    ) -> Result<Vec<CategoryCountRow>, AppError> {
        self.aggregate(pipeline::category_breakdown(filter)).await
    }

    /// Per-model enquiry and conversion totals.
    pub async fn sales_vs_enquiries(
        &self,
        filter: &TimeFilter,
    ) -> Result<Vec<SalesCountRow>, AppError> {
        self.aggregate(pipeline::sales_vs_enquiries(filter)).await
    }

    /// Up to 50 transcript records, unfiltered.
    pub async fn list_transcripts(&self) -> Result<Vec<Transcript>, AppError> {
        let cursor = self
            .db
            .collection::<Transcript>(TRANSCRIPTS)
            .find(doc! {})
            .limit(TRANSCRIPT_LIMIT)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn aggregate<T>(&self, pipeline: Vec<Document>) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let cursor = self.enquiries().aggregate(pipeline).await?;
        Ok(cursor.with_type::<T>().try_collect().await?)
    }
}
