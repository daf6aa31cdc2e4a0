use crate::common::print_outcome;
use clap::Args;
use regrws::{Bound, RegrwsClient};
use std::net::IpAddr;

#[derive(Clone, Copy)]
pub enum Search {
    MostSpecific,
    Parent,
}

#[derive(Args)]
pub struct FindArgs {
    /// First address of the range
    start: IpAddr,

    /// Last address of the range
    end: IpAddr,
}

impl FindArgs {
    pub async fn run(&self, client: &RegrwsClient, search: Search) -> anyhow::Result<()> {
        if self.start.is_ipv4() != self.end.is_ipv4() {
            anyhow::bail!("{} and {} are different address families", self.start, self.end);
        }
        let nets = client.net();
        let outcome = match search {
            Search::MostSpecific => nets.find_net(self.start, self.end).await?,
            Search::Parent => nets.find_parent(self.start, self.end).await?,
        };
        print_outcome(outcome.map(Bound::into_inner))
    }
}
