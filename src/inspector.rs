// src/inspector.rs
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};

use crate::check::{InspectError, OutageInspector};

/// Public announcement page for planned interruptions.
const OUTAGE_URL: &str = "https://pgedystrybucja.pl/wylaczenia/planowane-wylaczenia";

/// Budget for any single expected element to appear.
const ELEMENT_WAIT: Duration = Duration::from_secs(30);

/// The results panel renders after submit with no stable marker to wait on.
const RESULTS_SETTLE: Duration = Duration::from_secs(2);

/// Lookups target the next day, rendered the way the page labels its date
/// tabs: two-digit day and month, four-digit year.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today + Days::new(1)
}

/// The autocomplete entry the page offers for an exact city match.
pub fn city_suggestion(city: &str) -> String {
    format!("{city} - gmina: {city}")
}

/// Drives the outage page through a WebDriver endpoint. One browser session
/// per check attempt; released on every exit path.
pub struct PgeOutagePage {
    webdriver_url: String,
}

impl PgeOutagePage {
    pub fn new(webdriver_url: String) -> Self {
        Self { webdriver_url }
    }

    async fn connect(&self) -> Result<Client, InspectError> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({ "args": ["--headless=new", "--disable-gpu"] }),
        );
        ClientBuilder::native()
            .capabilities(caps)
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| InspectError::Session(e.to_string()))
    }

    async fn drive(
        &self,
        client: &Client,
        city: &str,
        destination: &str,
    ) -> Result<bool, InspectError> {
        client.goto(OUTAGE_URL).await.map_err(command)?;

        wait_for(
            client,
            Locator::XPath("//button[normalize-space()='Akceptuję']"),
            "consent dialog",
        )
        .await?
        .click()
        .await
        .map_err(command)?;

        let label = date_label(tomorrow(Local::now().date_naive()));
        let date_tab = format!("//button[normalize-space()='{label}']");
        wait_for(client, Locator::XPath(&date_tab), "tomorrow's date tab")
            .await?
            .click()
            .await
            .map_err(command)?;

        let city_input = wait_for(
            client,
            Locator::XPath("//input[@placeholder='Miejscowość']"),
            "location field",
        )
        .await?;
        city_input.click().await.map_err(command)?;
        city_input.send_keys(city).await.map_err(command)?;

        let suggestion = format!(
            "//*[normalize-space(text())='{}']",
            city_suggestion(city)
        );
        wait_for(client, Locator::XPath(&suggestion), "city suggestion")
            .await?
            .click()
            .await
            .map_err(command)?;

        wait_for(
            client,
            Locator::XPath("//button[normalize-space()='Szukaj']"),
            "search button",
        )
        .await?
        .click()
        .await
        .map_err(command)?;

        tokio::time::sleep(RESULTS_SETTLE).await;

        let matches = client
            .find_all(Locator::XPath(&format!(
                "//*[contains(text(), '{destination}')]"
            )))
            .await
            .map_err(command)?;
        for candidate in matches {
            if candidate.is_displayed().await.map_err(command)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[async_trait]
impl OutageInspector for PgeOutagePage {
    async fn check(&self, city: &str, destination: &str) -> Result<bool, InspectError> {
        let client = self.connect().await?;
        let result = self.drive(&client, city, destination).await;
        // one session per attempt; release it whatever `drive` returned
        if let Err(e) = client.close().await {
            tracing::warn!(error = %e, "closing webdriver session failed");
        }
        result
    }
}

async fn wait_for(
    client: &Client,
    locator: Locator<'_>,
    what: &str,
) -> Result<Element, InspectError> {
    client
        .wait()
        .at_most(ELEMENT_WAIT)
        .for_element(locator)
        .await
        .map_err(|e| match e {
            CmdError::WaitTimeout => InspectError::ElementTimeout {
                what: what.to_string(),
            },
            other => InspectError::Command(other.to_string()),
        })
}

fn command(err: CmdError) -> InspectError {
    InspectError::Command(err.to_string())
}
