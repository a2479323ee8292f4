//! HTTP [`Backend`] implementation.

mod dto;

use std::time::Duration;

use common::{
    operations::{By, Delete, Insert, Select},
    Currency,
};
use derive_more::Debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret as _, SecretString};
use serde::de::DeserializeOwned;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{complex, preferences::Favorite, Intent, TimeSlot},
    infra::{backend, Backend},
};

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the booking site's REST API.
    pub url: String,

    /// Timeout of a single request.
    pub timeout: Duration,

    /// Service token to authorize requests with, if required.
    #[debug(skip)]
    pub token: Option<SecretString>,

    /// [`Currency`] the booking site quotes its prices in.
    pub currency: Currency,
}

/// REST API client of the booking site.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP [`Client`].
    client: Client,

    /// Base URL of the API, without a trailing slash.
    base_url: String,

    /// Service token to authorize requests with.
    #[debug(skip)]
    token: Option<SecretString>,

    /// [`Currency`] of the prices.
    currency: Currency,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build an HTTP [`Client`].
    pub fn new(conf: Config) -> Result<Self, Traced<backend::Error>> {
        let client = Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> backend::Error))?;

        Ok(Self {
            client,
            base_url: conf.url.trim_end_matches('/').to_owned(),
            token: conf.token,
            currency: conf.currency,
        })
    }

    /// Prepares a request to the provided API `path`.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url =
            format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Sends the provided request, checking its response status.
    async fn send(
        req: RequestBuilder,
    ) -> Result<Response, Traced<backend::Error>> {
        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> backend::Error))?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            log::debug!(%status, url = %resp.url(), "`Backend` refused");
            Err(tracerr::new!(backend::Error::Status(status.as_u16())))
        }
    }

    /// Sends the provided request, decoding its JSON response body.
    async fn fetch<T: DeserializeOwned>(
        req: RequestBuilder,
    ) -> Result<T, Traced<backend::Error>> {
        Self::send(req)
            .await
            .map_err(tracerr::wrap!())?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> backend::Error))
    }
}

impl Backend<Select<By<Vec<TimeSlot>, ()>>> for Http {
    type Ok = Vec<TimeSlot>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<TimeSlot>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::GET, "api/timeslots");
        Self::fetch::<Vec<dto::Slot>>(req)
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(TimeSlot::try_from)
            .collect::<Result<_, _>>()
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Select<By<complex::Detail, complex::Selection>>> for Http {
    type Ok = complex::Detail;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<complex::Detail, complex::Selection>>,
    ) -> Result<Self::Ok, Self::Err> {
        let complex::Selection {
            complex_id,
            date,
            slot_id,
        } = by.into_inner();

        let mut path = format!("api/complexes/{complex_id}?date={date}");
        if let Some(slot_id) = slot_id {
            path.push_str(&format!("&slotId={slot_id}"));
        }

        Self::fetch::<dto::Detail>(self.request(Method::GET, &path))
            .await
            .map_err(tracerr::wrap!())?
            .normalize(self.currency)
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Insert<Intent>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(intent): Insert<Intent>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::send(self.request(Method::POST, "api/bookings").json(&intent))
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Insert<Favorite>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(fav): Insert<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("api/favorites/{}", fav.field_id);
        Self::send(self.request(Method::POST, &path).json(&fav))
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}

impl Backend<Delete<Favorite>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(fav): Delete<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("api/favorites/{}", fav.field_id);
        Self::send(self.request(Method::DELETE, &path).json(&fav))
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}
