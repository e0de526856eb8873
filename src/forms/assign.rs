//! Parsing of client lists for bulk assignment.
//!
//! Rows come either from an uploaded CSV file or from a JSON array. Both paths
//! funnel into [`collect_client_rows`], which normalizes phones, drops invalid
//! rows and removes duplicates within the batch.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;

use crate::domain::types::{AssigneeRole, ClientName, Location, PhoneNumber, UserId};
use crate::forms::FormError;

const NAME_HEADERS: &[&str] = &["name", "client name", "customer name", "full name"];
const PHONE_HEADERS: &[&str] = &[
    "phone",
    "phone number",
    "contact",
    "contact number",
    "mobile",
    "mobile number",
];
const LOCATION_HEADERS: &[&str] = &["location", "city", "area", "address", "branch"];

pub const DEFAULT_LOCATION: &str = "Unknown";

/// Client row as received, before any validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClientRow {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Client row that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRow {
    pub name: ClientName,
    pub phone: PhoneNumber,
    pub location: Location,
}

/// Outcome of parsing a batch of client rows.
#[derive(Debug, Default)]
pub struct ParsedClients {
    pub rows: Vec<ClientRow>,
    /// Rows repeating a phone number already seen in the batch.
    pub duplicates: usize,
    /// Rows lacking a name or a usable phone number.
    pub invalid: usize,
}

/// Validated request to assign a batch of clients to one user.
#[derive(Debug)]
pub struct AssignClientsPayload {
    pub assignee_id: UserId,
    /// When absent the assignee's own role is used.
    pub assigned_role: Option<AssigneeRole>,
    pub clients: ParsedClients,
}

fn validate_row(row: RawClientRow) -> Option<ClientRow> {
    let name = ClientName::new(row.name?).ok()?;
    let phone = PhoneNumber::new(row.phone?).ok()?;
    let location = row
        .location
        .and_then(|location| Location::new(location).ok())
        .or_else(|| Location::new(DEFAULT_LOCATION).ok())?;
    Some(ClientRow {
        name,
        phone,
        location,
    })
}

/// Validates raw rows, keeping the first occurrence of each phone number.
pub fn collect_client_rows<I>(rows: I) -> ParsedClients
where
    I: IntoIterator<Item = RawClientRow>,
{
    let mut parsed = ParsedClients::default();
    let mut seen = HashSet::new();

    for raw in rows {
        let Some(row) = validate_row(raw) else {
            parsed.invalid += 1;
            continue;
        };
        if !seen.insert(row.phone.as_str().to_string()) {
            parsed.duplicates += 1;
            continue;
        }
        parsed.rows.push(row);
    }

    parsed
}

fn pick(cells: &HashMap<String, String>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| cells.get(*alias).cloned())
}

/// Reads client rows from CSV data with a header line.
///
/// Headers are matched case-insensitively against a set of known aliases.
pub fn parse_client_rows<R: Read>(reader: R) -> Result<ParsedClients, FormError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect::<Vec<_>>();

    let mut raw_rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect::<HashMap<_, _>>();
        if cells.is_empty() {
            continue;
        }
        raw_rows.push(RawClientRow {
            name: pick(&cells, NAME_HEADERS),
            phone: pick(&cells, PHONE_HEADERS),
            location: pick(&cells, LOCATION_HEADERS),
        });
    }

    Ok(collect_client_rows(raw_rows))
}

fn parse_role(role: Option<&str>) -> Result<Option<AssigneeRole>, FormError> {
    role.map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::parse::<AssigneeRole>)
        .transpose()
        .map_err(FormError::from)
}

/// JSON body of the bulk assignment endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignClientsForm {
    pub assigned_user_id: Option<i32>,
    pub assigned_role: Option<String>,
    #[serde(default)]
    pub clients: Vec<RawClientRow>,
}

impl TryFrom<AssignClientsForm> for AssignClientsPayload {
    type Error = FormError;

    fn try_from(form: AssignClientsForm) -> Result<Self, Self::Error> {
        let assignee_id = form.assigned_user_id.ok_or(FormError::MissingAssignee)?;
        let assigned_role = parse_role(form.assigned_role.as_deref())?;
        let clients = collect_client_rows(form.clients);
        if clients.rows.is_empty() {
            return Err(FormError::NoValidRows);
        }

        Ok(Self {
            assignee_id: UserId::new(assignee_id)?,
            assigned_role,
            clients,
        })
    }
}

/// Multipart upload of a CSV client list.
#[derive(MultipartForm)]
pub struct UploadClientsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
    #[multipart(rename = "assigneeId")]
    pub assignee_id: Text<i32>,
    #[multipart(rename = "assignedRole")]
    pub assigned_role: Option<Text<String>>,
}

impl UploadClientsForm {
    /// Reads the uploaded file and validates its rows.
    pub fn parse(&self) -> Result<AssignClientsPayload, FormError> {
        let file = self
            .csv
            .file
            .reopen()
            .map_err(|e| FormError::Csv(e.to_string()))?;
        let clients = parse_client_rows(file)?;
        if clients.rows.is_empty() {
            return Err(FormError::NoValidRows);
        }

        Ok(AssignClientsPayload {
            assignee_id: UserId::new(*self.assignee_id)?,
            assigned_role: parse_role(self.assigned_role.as_ref().map(|role| role.as_str()))?,
            clients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliased_headers() {
        let csv = "\u{feff}Customer Name, Mobile Number ,City\n\
                   Ravi Kumar,+91 98450 12345,Bengaluru\n\
                   Meera,98450-22222,\n";
        let parsed = parse_client_rows(csv.as_bytes()).unwrap();

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].name.as_str(), "Ravi Kumar");
        assert_eq!(parsed.rows[0].phone.as_str(), "+919845012345");
        assert_eq!(parsed.rows[0].location.as_str(), "Bengaluru");
        assert_eq!(parsed.rows[1].phone.as_str(), "9845022222");
        assert_eq!(parsed.rows[1].location.as_str(), DEFAULT_LOCATION);
    }

    #[test]
    fn counts_invalid_and_duplicate_rows() {
        let csv = "name,phone,location\n\
                   Asha,555-0101,Pune\n\
                   ,555-0102,Pune\n\
                   Bilal,no phone,Pune\n\
                   Asha Again,5550101,Mumbai\n\
                   Chen,555 0103,\n";
        let parsed = parse_client_rows(csv.as_bytes()).unwrap();

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.invalid, 2);
        assert_eq!(parsed.duplicates, 1);
        assert_eq!(parsed.rows[0].location.as_str(), "Pune");
        assert_eq!(parsed.rows[1].name.as_str(), "Chen");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let csv = "phone,name\n\n5550199,Dana\n,\n";
        let parsed = parse_client_rows(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.invalid, 0);
    }

    #[test]
    fn json_form_requires_assignee_and_rows() {
        let form = AssignClientsForm {
            assigned_user_id: None,
            ..AssignClientsForm::default()
        };
        assert!(matches!(
            AssignClientsPayload::try_from(form),
            Err(FormError::MissingAssignee)
        ));

        let form = AssignClientsForm {
            assigned_user_id: Some(4),
            assigned_role: None,
            clients: vec![RawClientRow {
                name: Some("No Phone".into()),
                ..RawClientRow::default()
            }],
        };
        assert!(matches!(
            AssignClientsPayload::try_from(form),
            Err(FormError::NoValidRows)
        ));
    }

    #[test]
    fn json_form_parses_role() {
        let form: AssignClientsForm = serde_json::from_str(
            r#"{"assignedUserId": 3, "assignedRole": "fieldperson",
                "clients": [{"name": "Eve", "phone": "555 0111"}]}"#,
        )
        .unwrap();
        let payload = AssignClientsPayload::try_from(form).unwrap();
        assert_eq!(payload.assignee_id.get(), 3);
        assert_eq!(payload.assigned_role, Some(AssigneeRole::Fieldperson));
        assert_eq!(payload.clients.rows[0].location.as_str(), DEFAULT_LOCATION);

        let form = AssignClientsForm {
            assigned_user_id: Some(3),
            assigned_role: Some("admin".into()),
            clients: vec![],
        };
        assert!(matches!(
            AssignClientsPayload::try_from(form),
            Err(FormError::InvalidValue(_))
        ));
    }
}
