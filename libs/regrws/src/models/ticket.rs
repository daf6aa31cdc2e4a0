use super::common::{Attachment, MultiLineElement, decode_lines, decode_list, encode_list};
use super::net::Net;
use crate::error::{DecodeError, ValidationError};
use crate::types::wire_enum;
use crate::xml::{Element, MESSAGES_NAMESPACE, XmlModel};

wire_enum! {
    pub enum WebTicketType("ticket type") {
        PocRecovery => "POC_RECOVERY",
        Question => "QUESTION",
        AssociationsReport => "ASSOCIATIONS_REPORT",
        ReassignmentReport => "REASSIGNMENT_REPORT",
        OrgCreate => "ORG_CREATE",
        EditOrgName => "EDIT_ORG_NAME",
        OrgRecovery => "ORG_RECOVERY",
        TransferListingService => "TRANSFER_LISTING_SERVICE",
        Ipv4SimpleReassign => "IPV4_SIMPLE_REASSIGN",
        Ipv4DetailedReassign => "IPV4_DETAILED_REASSIGN",
        Ipv4Reallocate => "IPV4_REALLOCATE",
        Ipv6DetailedReassign => "IPV6_DETAILED_REASSIGN",
        Ipv6Reallocate => "IPV6_REALLOCATE",
        NetDeleteRequest => "NET_DELETE_REQUEST",
        IspIpv4Request => "ISP_IPV4_REQUEST",
        IspIpv6Request => "ISP_IPV6_REQUEST",
        CreateResourceCertificate => "CREATE_RESOURCE_CERTIFICATE",
        CreateRoa => "CREATE_ROA",
        EndUserIpv4Request => "END_USER_IPV4_REQUEST",
        EndUserIpv6Request => "END_USER_IPV6_REQUEST",
        AsnRequest => "ASN_REQUEST",
        EditBillingContactInfo => "EDIT_BILLING_CONTACT_INFO",
        Any => "ANY",
    }
}

wire_enum! {
    pub enum WebTicketStatus("ticket status") {
        PendingConfirmation => "PENDING_CONFIRMATION",
        PendingReview => "PENDING_REVIEW",
        Assigned => "ASSIGNED",
        InProgress => "IN_PROGRESS",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
        Approved => "APPROVED",
        Any => "ANY",
        AnyOpen => "ANY_OPEN",
    }
}

wire_enum! {
    pub enum WebTicketResolution("ticket resolution") {
        Accepted => "ACCEPTED",
        Denied => "DENIED",
        Abandoned => "ABANDONED",
        Answered => "ANSWERED",
        Processed => "PROCESSED",
        Duplicate => "DUPLICATE",
        Withdrawn => "WITHDRAWN",
        Unsuccessful => "UNSUCCESSFUL",
        Other => "OTHER",
    }
}

/// Message posted on a ticket.
///
/// `messageId` and `createdDate` live in the messages namespace and are
/// written with the `msg` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketMessage {
    pub message_id: String,
    pub created_date: String,
    pub subject: Option<String>,
    pub text: Vec<MultiLineElement>,
    pub category: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl XmlModel for TicketMessage {
    const TAG: &'static str = "message";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            message_id: element.required_text("messageId")?,
            created_date: element.required_text("createdDate")?,
            subject: element.optional_text("subject"),
            text: decode_lines(element, "text")?,
            category: element.optional_text("category"),
            attachments: decode_list(element, "attachments")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .with_attr("xmlns:msg", MESSAGES_NAMESPACE)
            .leaf("msg:messageId", &self.message_id)
            .leaf("msg:createdDate", &self.created_date)
            .leaf_opt("subject", self.subject.as_ref())
            .wrapped("text", encode_list(&self.text))
            .leaf_opt("category", self.category.as_ref())
            .wrapped("attachments", encode_list(&self.attachments))
    }
}

/// Queued registry operation.
///
/// Status and resolution are reported by the registry and never
/// interpreted by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub messages: Vec<TicketMessage>,
    pub ticket_no: String,
    pub created_date: String,
    pub resolved_date: Option<String>,
    pub closed_date: Option<String>,
    pub updated_date: Option<String>,
    pub web_ticket_type: WebTicketType,
    pub web_ticket_status: WebTicketStatus,
    pub web_ticket_resolution: Option<WebTicketResolution>,
}

impl XmlModel for Ticket {
    const TAG: &'static str = "ticket";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            messages: decode_list(element, "messages")?,
            ticket_no: element.required_text("ticketNo")?,
            created_date: element.required_text("createdDate")?,
            resolved_date: element.optional_text("resolvedDate"),
            closed_date: element.optional_text("closedDate"),
            updated_date: element.optional_text("updatedDate"),
            web_ticket_type: element.parse_required("webTicketType")?,
            web_ticket_status: element.parse_required("webTicketStatus")?,
            web_ticket_resolution: element.parse_optional("webTicketResolution")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .wrapped("messages", encode_list(&self.messages))
            .leaf("ticketNo", &self.ticket_no)
            .leaf("createdDate", &self.created_date)
            .leaf_opt("resolvedDate", self.resolved_date.as_ref())
            .leaf_opt("closedDate", self.closed_date.as_ref())
            .leaf_opt("updatedDate", self.updated_date.as_ref())
            .leaf("webTicketType", &self.web_ticket_type)
            .leaf("webTicketStatus", &self.web_ticket_status)
            .leaf_opt("webTicketResolution", self.web_ticket_resolution.as_ref())
    }
}

/// Answer to a ticketed net operation: the ticket and, when the registry
/// processed it immediately, the resulting net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    pub ticket: Ticket,
    pub net: Option<Net>,
}

impl XmlModel for TicketRequest {
    const TAG: &'static str = "ticketedRequest";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            ticket: Ticket::decode(element.required(Ticket::TAG)?)?,
            net: element.child(Net::TAG).map(Net::decode).transpose()?,
        })
    }

    fn to_element(&self) -> Element {
        let root = Element::new(Self::TAG).with_child(self.ticket.to_element());
        match &self.net {
            Some(net) => root.with_child(net.to_element()),
            None => root,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.net.as_ref().map_or(Ok(()), XmlModel::validate)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const OPEN_TICKET: &str = r#"<ticket xmlns="http://www.arin.net/regrws/core/v1">
        <messages>
            <message xmlns:msg="http://www.arin.net/regrws/messages/v1">
                <msg:messageId>MESSAGEID</msg:messageId>
                <msg:createdDate>Tue Feb 28 17:41:17 EST 2012</msg:createdDate>
                <subject>SUBJECT</subject>
                <text><line number="1">Line 1</line></text>
                <category>NONE</category>
            </message>
        </messages>
        <ticketNo>TICKETNO</ticketNo>
        <createdDate>Tue Jan 25 16:17:18 EST 2011</createdDate>
        <webTicketType>ORG_CREATE</webTicketType>
        <webTicketStatus>PENDING_REVIEW</webTicketStatus>
    </ticket>"#;

    #[test]
    fn test_open_ticket_without_resolution() {
        let ticket = Ticket::from_xml(OPEN_TICKET).unwrap();
        assert_eq!(ticket.web_ticket_type, WebTicketType::OrgCreate);
        assert_eq!(ticket.web_ticket_status, WebTicketStatus::PendingReview);
        assert_eq!(ticket.web_ticket_resolution, None);
        assert_eq!(ticket.messages[0].message_id, "MESSAGEID");
        assert_eq!(ticket.messages[0].text[0].line, "Line 1");
    }

    #[test]
    fn test_message_ids_use_msg_prefix() {
        let ticket = Ticket::from_xml(OPEN_TICKET).unwrap();
        let xml = ticket.to_xml().unwrap();
        assert!(xml.contains(r#"xmlns:msg="http://www.arin.net/regrws/messages/v1""#));
        assert!(xml.contains("<msg:messageId>MESSAGEID</msg:messageId>"));
        assert_eq!(Ticket::from_xml(&xml).unwrap(), ticket);
    }

    #[test]
    fn test_ticket_request_without_net() {
        let xml = format!("<ticketedRequest>{OPEN_TICKET}</ticketedRequest>");
        let request = TicketRequest::from_xml(&xml).unwrap();
        assert!(request.net.is_none());
        assert_eq!(request.ticket.ticket_no, "TICKETNO");
    }
}
