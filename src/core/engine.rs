use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct VerifyEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> VerifyEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting Pi verification...");

        println!("Fetching sources...");
        let raw = self.pipeline.extract().await?;
        println!("Fetched {} source(s)", raw.len());

        println!("Extracting and cross-checking digits...");
        let verified = self.pipeline.transform(raw).await?;
        println!("Verified {} decimal places", verified.decimals.len());

        println!("Writing report...");
        let summary = self.pipeline.load(verified).await?;

        Ok(summary)
    }
}
