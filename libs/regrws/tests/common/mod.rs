#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

//! Registry payload fixtures and a client pointed at a mock server.

use httpmock::MockServer;
use regrws::{RegrwsClient, RegrwsConfig};
use regrws_http::{HttpClientBuilder, HttpClientConfig};

pub const API_KEY: &str = "APIKEY";

pub const ORG_PAYLOAD: &str = r#"<org xmlns="http://www.arin.net/regrws/core/v1" >
    <iso3166-1>
        <name>UNITED STATES</name>
        <code2>US</code2>
        <code3>USA</code3>
        <e164>1</e164>
    </iso3166-1>
    <streetAddress>
        <line number = "1">Line 1</line>
    </streetAddress>
    <city>Chantilly</city>
    <iso3166-2>VA</iso3166-2>
    <postalCode>20151</postalCode>
    <comment>
        <line number = "1">Line 1</line>
    </comment>
    <handle>ARIN</handle>
    <registrationDate>Mon Nov 07 14:04:28 EST 2011</registrationDate>
    <orgName>ORGNAME</orgName>
    <dbaName>DBANAME</dbaName>
    <taxId>TAXID</taxId>
    <orgUrl>http://example.com/org/ARIN</orgUrl>
    <pocLinks>
        <pocLinkRef description="Tech" function="T" handle="EXAMPLETECH-ARIN"/>
        <pocLinkRef description="Admin" function="AD" handle="EXAMPLEADMIN-ARIN"/>
    </pocLinks>
</org>"#;

pub const CUSTOMER_PAYLOAD: &str = r#"<customer xmlns="http://www.arin.net/regrws/core/v1" >
    <customerName>CUSTOMERNAME</customerName>
    <iso3166-1>
        <name>UNITED STATES</name>
        <code2>US</code2>
        <code3>USA</code3>
        <e164>1</e164>
    </iso3166-1>
    <streetAddress>
        <line number = "1">Line 1</line>
    </streetAddress>
    <city>Chantilly</city>
        <iso3166-2>VA</iso3166-2>
    <postalCode>20151</postalCode>
    <comment>
        <line number = "1">Line 1</line>
    </comment>
    <handle>CUST</handle>
    <parentOrgHandle>PARENTORGHANDLE</parentOrgHandle>
    <registrationDate>Mon Nov 07 14:04:28 EST 2011</registrationDate>
    <privateCustomer>false</privateCustomer>
</customer>"#;

pub const NETBLOCK_PAYLOAD: &str = r#"<netBlock xmlns="http://www.arin.net/regrws/core/v1" >
    <type>A</type>
    <description>DESCRIPTION</description>
    <startAddress>010.000.000.000</startAddress>
    <endAddress>010.000.000.255</endAddress>
    <cidrLength>24</cidrLength>
</netBlock>"#;

pub const NET_PAYLOAD: &str = r#"<net xmlns="http://www.arin.net/regrws/core/v1" >
    <version>4</version>
    <comment>
        <line number = "1">Line 1</line>
    </comment>
    <registrationDate>Tue Jan 25 16:17:18 EST 2011</registrationDate>
    <handle>NET-10-0-0-0-1</handle>
    <netBlocks>
        <netBlock>
            <type>A</type>
            <description>DESCRIPTION</description>
            <startAddress>010.000.000.000</startAddress>
            <endAddress>010.000.000.255</endAddress>
            <cidrLength>24</cidrLength>
        </netBlock>
    </netBlocks>
    <customerHandle>C12341234</customerHandle>
    <parentNetHandle>PARENTNETHANDLE</parentNetHandle>
    <netName>NETNAME</netName>
    <originASes>
        <originAS>AS102</originAS>
    </originASes>
    <pocLinks>
        <pocLinkRef description="Tech" function="T" handle="EXAMPLETECH-ARIN"/>
        <pocLinkRef description="Admin" function="AD" handle="EXAMPLEADMIN-ARIN"/>
    </pocLinks>
</net>"#;

pub const POC_PAYLOAD: &str = r#"<poc xmlns="http://www.arin.net/regrws/core/v1">
    <iso3166-1>
        <code2>US</code2>
    </iso3166-1>
    <streetAddress>
        <line number="1">3635 Concorde Parkway</line>
    </streetAddress>
    <city>Chantilly</city>
    <iso3166-2>VA</iso3166-2>
    <postalCode>20151</postalCode>
    <handle>EXAMPLENOC-ARIN</handle>
    <contactType>ROLE</contactType>
    <companyName>Example Networks</companyName>
    <lastName>Network Operations</lastName>
    <phones>
        <phone>
            <type><description>Office</description><code>O</code></type>
            <number>+1-703-227-0660</number>
        </phone>
    </phones>
</poc>"#;

pub const ERROR_PAYLOAD: &str = r#"<error xmlns="http://www.arin.net/regrws/core/v1">
    <message>Payload has errors</message>
    <code>E_SCHEMA_VALIDATION</code>
    <components>
        <component>
            <name>orgName</name>
            <message>orgName is required</message>
        </component>
    </components>
    <additionalInfo>
        <message>Line 1</message>
    </additionalInfo>
</error>"#;

pub const TICKET_PAYLOAD: &str = r#"<ticket xmlns="http://www.arin.net/regrws/core/v1">
    <messages>
        <message xmlns:msg="http://www.arin.net/regrws/messages/v1">
            <msg:messageId>MESSAGEID</msg:messageId>
            <msg:createdDate>Tue Feb 28 17:41:17 EST 2012</msg:createdDate>
            <subject>SUBJECT</subject>
            <text>
                <line number="1">Line 1</line>
            </text>
            <category>NONE</category>
            <attachments>
                <attachment>
                    <data>DATA</data>
                    <filename>FILENAME</filename>
                </attachment>
            </attachments>
        </message>
    </messages>
    <ticketNo>TICKETNO</ticketNo>
    <createdDate>Tue Jan 25 16:17:18 EST 2011</createdDate>
    <resolvedDate>Tue Jan 25 16:17:18 EST 2011</resolvedDate>
    <closedDate>Tue Jan 25 16:17:18 EST 2011</closedDate>
    <updatedDate>Tue Jan 25 16:17:18 EST 2011</updatedDate>
    <webTicketType>ORG_CREATE</webTicketType>
    <webTicketStatus>PENDING_REVIEW</webTicketStatus>
    <webTicketResolution>ACCEPTED</webTicketResolution>
</ticket>"#;

/// `<ticketedRequest>` wrapping a processed reassignment and its new net
pub fn ticket_request_payload() -> String {
    let ticket = TICKET_PAYLOAD
        .replace(r#" xmlns="http://www.arin.net/regrws/core/v1""#, "")
        .replace("ORG_CREATE", "IPV4_SIMPLE_REASSIGN")
        .replace("PENDING_REVIEW", "RESOLVED");
    let net = NET_PAYLOAD.replace(r#" xmlns="http://www.arin.net/regrws/core/v1" "#, "");
    format!(
        r#"<ticketedRequest xmlns="http://www.arin.net/regrws/core/v1">{ticket}{net}</ticketedRequest>"#
    )
}

pub fn client_for(server: &MockServer) -> RegrwsClient {
    let mut config = RegrwsConfig::new(&server.base_url(), API_KEY).unwrap();
    config.allow_insecure_http = true;
    let http = HttpClientBuilder::with_config(HttpClientConfig::for_testing())
        .build()
        .unwrap();
    RegrwsClient::with_http_client(config, http).unwrap()
}
