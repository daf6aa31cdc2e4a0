use crate::common::print_outcome;
use clap::{Args, ValueEnum};
use regrws::{Bound, Manager, RegrwsClient, Resource};

#[derive(Clone, Copy, ValueEnum)]
pub enum Kind {
    Org,
    Customer,
    Poc,
    Net,
}

#[derive(Args)]
pub struct GetArgs {
    /// Record type
    #[arg(value_enum)]
    kind: Kind,

    /// Registry handle, e.g. ARIN or NET-192-0-2-0-1
    handle: String,
}

impl GetArgs {
    pub async fn run(&self, client: &RegrwsClient) -> anyhow::Result<()> {
        match self.kind {
            Kind::Org => fetch(&client.org(), &self.handle).await,
            Kind::Customer => fetch(&client.customer(), &self.handle).await,
            Kind::Poc => fetch(&client.poc(), &self.handle).await,
            Kind::Net => fetch(&client.net(), &self.handle).await,
        }
    }
}

async fn fetch<M: Resource>(manager: &Manager<M>, handle: &str) -> anyhow::Result<()> {
    tracing::info!(kind = %manager.kind(), handle, "fetching record");
    print_outcome(manager.from_handle(handle).await?.map(Bound::into_inner))
}
