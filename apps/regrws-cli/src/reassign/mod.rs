//! Simple reassignment: create the recipient customer under the parent net,
//! then reassign a sub-block of the parent to it.

mod network;

use crate::common::describe_rejection;
use anyhow::Context;
use clap::{Args, ValueEnum};
use regrws::models::{
    Address, Customer, ErrorCode, Iso31661, MultiLineElement, Net, NetBlock, NetBlockType,
};
use regrws::types::CidrLength;
use regrws::{Bound, Outcome, RegrwsClient};

use network::Network;

#[derive(Clone, Copy, ValueEnum)]
pub enum Country {
    Us,
    Ca,
}

impl Country {
    fn iso3166_1(self) -> anyhow::Result<Iso31661> {
        let (name, code2, code3) = match self {
            Self::Us => ("United States of America", "US", "USA"),
            Self::Ca => ("Canada", "CA", "CAN"),
        };
        Ok(Iso31661::new(
            Some(name.to_owned()),
            Some(code2.parse()?),
            Some(code3.parse()?),
            Some(1),
        )?)
    }
}

#[derive(Args)]
pub struct ReassignArgs {
    /// Block to reassign, e.g. 192.0.2.0/28
    network: Network,

    /// Recipient customer name
    #[arg(long)]
    customer_name: String,

    #[arg(long)]
    street: String,

    #[arg(long)]
    city: String,

    /// ISO 3166-2 subdivision code, e.g. VA
    #[arg(long)]
    region: String,

    #[arg(long)]
    postal_code: String,

    #[arg(long, value_enum, default_value_t = Country::Us)]
    country: Country,

    /// Parent net handle; found by range search when omitted
    #[arg(long)]
    parent: Option<String>,

    /// Name of the new net; derived from the customer name when omitted
    #[arg(long)]
    net_name: Option<String>,

    /// Resolve the parent and report what would happen without changing anything
    #[arg(long)]
    dry_run: bool,
}

impl ReassignArgs {
    pub async fn run(&self, client: &RegrwsClient) -> anyhow::Result<()> {
        let network = self.network;
        tracing::info!(%network, dry_run = self.dry_run, "starting reassignment");

        let parent = match &self.parent {
            Some(handle) => {
                let parent = client
                    .net()
                    .from_handle(handle)
                    .await?
                    .into_result()
                    .with_context(|| format!("failed to retrieve parent net {handle}"))?;
                if already_reassigned(client, network, &parent).await? {
                    return Ok(());
                }
                parent
            }
            None => find_covering(client, network)
                .await?
                .with_context(|| format!("no registered net covers {network}"))?,
        };
        let parent_handle = parent
            .handle
            .clone()
            .context("parent net has no handle")?;
        println!("Parent net: {parent_handle}");

        if self.dry_run {
            println!("DRY RUN: would reassign {network} under parent {parent_handle}");
            return Ok(());
        }

        let customer = self.create_customer(client, &parent).await?;
        let customer_handle = customer
            .handle
            .clone()
            .context("registry returned a customer without a handle")?;
        println!("Created customer: {customer_handle}");

        let net_name = self
            .net_name
            .clone()
            .unwrap_or_else(|| network.net_name(&self.customer_name));
        let block = NetBlock::new(
            NetBlockType::S,
            network.address(),
            None,
            Some(CidrLength::try_from(network.prefix())?),
        )?;
        let recipient = Net::builder(network.version())
            .net_name(net_name)
            .net_block(block)
            .parent_net_handle(parent_handle)
            .customer_handle(customer_handle)
            .build()?;

        match parent.reassign(&recipient).await? {
            Outcome::Success(request) => {
                let ticket = &request.ticket;
                println!(
                    "Ticket {}: {} ({})",
                    ticket.ticket_no, ticket.web_ticket_type, ticket.web_ticket_status
                );
                if let Some(handle) = request.net.as_ref().and_then(|net| net.handle.as_deref()) {
                    println!("Reassigned {network} as {handle}");
                }
                Ok(())
            }
            Outcome::Rejected { status, error } => {
                anyhow::bail!("reassignment rejected ({status}): {}", describe_rejection(&error))
            }
        }
    }

    async fn create_customer(
        &self,
        client: &RegrwsClient,
        parent: &Net,
    ) -> anyhow::Result<Bound<Customer>> {
        let address = Address::new(self.country.iso3166_1()?, [&self.street], &self.city)
            .with_region(self.region.parse()?)
            .with_postal_code(&self.postal_code);
        let mut customer = Customer::new(&self.customer_name, address);
        customer.private_customer = Some(false);
        customer.comment = MultiLineElement::numbered(["Created via regrws"]);

        client
            .customer()
            .create_for_net(parent, &customer)
            .await?
            .into_result()
            .context("failed to create customer")
    }
}

/// Most specific registered net covering `network`, if any
async fn find_covering(
    client: &RegrwsClient,
    network: Network,
) -> anyhow::Result<Option<Bound<Net>>> {
    let (start, end) = network.search_range();
    match client.net().find_net(start, end).await? {
        Outcome::Success(net) => Ok(Some(net)),
        Outcome::Rejected { error, .. } if error.code == ErrorCode::ObjectNotFound => {
            tracing::info!(%network, "no registered net found");
            Ok(None)
        }
        Outcome::Rejected { status, error } => {
            anyhow::bail!("search for {network} failed ({status}): {}", describe_rejection(&error))
        }
    }
}

/// Whether `network` is already registered to a customer below `parent`
async fn already_reassigned(
    client: &RegrwsClient,
    network: Network,
    parent: &Net,
) -> anyhow::Result<bool> {
    let Some(existing) = find_covering(client, network).await? else {
        return Ok(false);
    };
    if existing.handle == parent.handle {
        return Ok(false);
    }
    match &existing.customer_handle {
        Some(customer) => {
            println!("{network} is already reassigned to customer {customer}");
            Ok(true)
        }
        None => {
            tracing::warn!(%network, handle = ?existing.handle, "net exists but is not reassigned");
            Ok(false)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use regrws::RegrwsConfig;

    const API_KEY: &str = "APIKEY";
    const SEARCH_PATH: &str = "/rest/net/mostSpecificNet/10.0.0.0/10.0.0.15";
    const CUSTOMER_PATH: &str = "/rest/net/NET-10-0-0-0-1/customer";
    const REASSIGN_PATH: &str = "/rest/net/NET-10-0-0-0-1/reassign";

    const PARENT_NET: &str = r#"<net xmlns="http://www.arin.net/regrws/core/v1">
    <version>4</version>
    <handle>NET-10-0-0-0-1</handle>
    <netBlocks>
        <netBlock>
            <type>A</type>
            <startAddress>10.0.0.0</startAddress>
            <cidrLength>24</cidrLength>
        </netBlock>
    </netBlocks>
    <orgHandle>EXAMPLE-ARIN</orgHandle>
    <netName>EXAMPLE-NET</netName>
</net>"#;

    const REASSIGNED_NET: &str = r#"<net xmlns="http://www.arin.net/regrws/core/v1">
    <version>4</version>
    <handle>NET-10-0-0-0-2</handle>
    <netBlocks>
        <netBlock>
            <type>S</type>
            <startAddress>10.0.0.0</startAddress>
            <cidrLength>28</cidrLength>
        </netBlock>
    </netBlocks>
    <customerHandle>C00000001</customerHandle>
    <parentNetHandle>NET-10-0-0-0-1</parentNetHandle>
    <netName>OTHER-CORP-10-0-0-0-28</netName>
</net>"#;

    const CREATED_CUSTOMER: &str = r#"<customer xmlns="http://www.arin.net/regrws/core/v1">
    <customerName>Example Corp</customerName>
    <iso3166-1>
        <code2>US</code2>
    </iso3166-1>
    <streetAddress>
        <line number="1">123 Main Street</line>
    </streetAddress>
    <city>Anytown</city>
    <iso3166-2>VA</iso3166-2>
    <postalCode>12345</postalCode>
    <handle>C00000042</handle>
    <parentOrgHandle>EXAMPLE-ARIN</parentOrgHandle>
    <privateCustomer>false</privateCustomer>
</customer>"#;

    const TICKETED_REQUEST: &str = r#"<ticketedRequest xmlns="http://www.arin.net/regrws/core/v1">
    <ticket>
        <ticketNo>20240101-X1</ticketNo>
        <createdDate>Mon Jan 01 10:00:00 EST 2024</createdDate>
        <webTicketType>IPV4_SIMPLE_REASSIGN</webTicketType>
        <webTicketStatus>RESOLVED</webTicketStatus>
    </ticket>
</ticketedRequest>"#;

    fn error_payload(code: &str) -> String {
        format!(
            r#"<error xmlns="http://www.arin.net/regrws/core/v1">
    <message>request failed</message>
    <code>{code}</code>
</error>"#
        )
    }

    fn client_for(server: &MockServer) -> RegrwsClient {
        let mut config = RegrwsConfig::new(&server.base_url(), API_KEY).unwrap();
        config.allow_insecure_http = true;
        RegrwsClient::new(config).unwrap()
    }

    fn reassign_args(parent: Option<&str>, dry_run: bool) -> ReassignArgs {
        ReassignArgs {
            network: "10.0.0.0/28".parse().unwrap(),
            customer_name: "Example Corp".to_owned(),
            street: "123 Main Street".to_owned(),
            city: "Anytown".to_owned(),
            region: "VA".to_owned(),
            postal_code: "12345".to_owned(),
            country: Country::Us,
            parent: parent.map(ToOwned::to_owned),
            net_name: None,
            dry_run,
        }
    }

    /// Write endpoints that must stay untouched unless the workflow gets that far
    fn write_mocks(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
        let customer = server.mock(|when, then| {
            when.method(POST).path(CUSTOMER_PATH);
            then.status(200).body(CREATED_CUSTOMER);
        });
        let reassign = server.mock(|when, then| {
            when.method(PUT).path(REASSIGN_PATH);
            then.status(200).body(TICKETED_REQUEST);
        });
        (customer, reassign)
    }

    #[tokio::test]
    async fn test_creates_customer_then_reassigns() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(GET)
                .path(SEARCH_PATH)
                .query_param("apikey", API_KEY);
            then.status(200).body(PARENT_NET);
        });
        let customer = server.mock(|when, then| {
            when.method(POST)
                .path(CUSTOMER_PATH)
                .query_param("apikey", API_KEY)
                .body_includes("<customerName>Example Corp</customerName>")
                .body_includes("<privateCustomer>false</privateCustomer>");
            then.status(200).body(CREATED_CUSTOMER);
        });
        let reassign = server.mock(|when, then| {
            when.method(PUT)
                .path(REASSIGN_PATH)
                .query_param("apikey", API_KEY)
                .body_includes("<netName>EXAMPLE-CORP-10-0-0-0-28</netName>")
                .body_includes("<customerHandle>C00000042</customerHandle>")
                .body_includes("<parentNetHandle>NET-10-0-0-0-1</parentNetHandle>")
                .body_includes("<type>S</type>")
                .body_includes("<cidrLength>28</cidrLength>");
            then.status(200).body(TICKETED_REQUEST);
        });

        reassign_args(None, false)
            .run(&client_for(&server))
            .await
            .unwrap();

        search.assert();
        customer.assert();
        reassign.assert();
    }

    #[tokio::test]
    async fn test_explicit_net_name_is_used() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).body(PARENT_NET);
        });
        server.mock(|when, then| {
            when.method(POST).path(CUSTOMER_PATH);
            then.status(200).body(CREATED_CUSTOMER);
        });
        let reassign = server.mock(|when, then| {
            when.method(PUT)
                .path(REASSIGN_PATH)
                .body_includes("<netName>CUSTOM-NAME</netName>");
            then.status(200).body(TICKETED_REQUEST);
        });

        let mut args = reassign_args(None, false);
        args.net_name = Some("CUSTOM-NAME".to_owned());
        args.run(&client_for(&server)).await.unwrap();
        reassign.assert();
    }

    #[tokio::test]
    async fn test_already_reassigned_stops_before_writes() {
        let server = MockServer::start();
        let parent = server.mock(|when, then| {
            when.method(GET).path("/rest/net/NET-10-0-0-0-1");
            then.status(200).body(PARENT_NET);
        });
        let search = server.mock(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).body(REASSIGNED_NET);
        });
        let (customer, reassign) = write_mocks(&server);

        reassign_args(Some("net-10-0-0-0-1"), false)
            .run(&client_for(&server))
            .await
            .unwrap();

        parent.assert();
        search.assert();
        customer.assert_calls(0);
        reassign.assert_calls(0);
    }

    #[tokio::test]
    async fn test_parent_covering_itself_proceeds() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/net/NET-10-0-0-0-1");
            then.status(200).body(PARENT_NET);
        });
        server.mock(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).body(PARENT_NET);
        });
        let (customer, reassign) = write_mocks(&server);

        reassign_args(Some("NET-10-0-0-0-1"), false)
            .run(&client_for(&server))
            .await
            .unwrap();

        customer.assert();
        reassign.assert();
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_writes() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).body(PARENT_NET);
        });
        let (customer, reassign) = write_mocks(&server);

        reassign_args(None, true)
            .run(&client_for(&server))
            .await
            .unwrap();

        search.assert();
        customer.assert_calls(0);
        reassign.assert_calls(0);
    }

    #[tokio::test]
    async fn test_no_covering_net_bails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(404).body(error_payload("E_OBJECT_NOT_FOUND"));
        });
        let (customer, reassign) = write_mocks(&server);

        let err = reassign_args(None, false)
            .run(&client_for(&server))
            .await
            .unwrap_err();

        assert!(
            err.to_string().contains("no registered net covers 10.0.0.0/28"),
            "got {err:#}"
        );
        customer.assert_calls(0);
        reassign.assert_calls(0);
    }

    #[tokio::test]
    async fn test_rejected_search_bails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(401).body(error_payload("E_AUTHENTICATION"));
        });
        let (customer, reassign) = write_mocks(&server);

        let err = reassign_args(None, false)
            .run(&client_for(&server))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("search for 10.0.0.0/28 failed"), "got {message}");
        assert!(message.contains("E_AUTHENTICATION"), "got {message}");
        customer.assert_calls(0);
        reassign.assert_calls(0);
    }

    #[tokio::test]
    async fn test_rejected_reassignment_bails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(SEARCH_PATH);
            then.status(200).body(PARENT_NET);
        });
        let customer = server.mock(|when, then| {
            when.method(POST).path(CUSTOMER_PATH);
            then.status(200).body(CREATED_CUSTOMER);
        });
        server.mock(|when, then| {
            when.method(PUT).path(REASSIGN_PATH);
            then.status(400).body(error_payload("E_ENTITY_VALIDATION"));
        });

        let err = reassign_args(None, false)
            .run(&client_for(&server))
            .await
            .unwrap_err();

        assert!(
            err.to_string().starts_with("reassignment rejected (400"),
            "got {err:#}"
        );
        customer.assert();
    }
}
