#![allow(dead_code)]

use std::sync::Mutex;

use abi::{
    AvailabilityQuery, AvailabilityRecord, Error, LoginRequest, LoginResponse, RegisterRequest,
    RoomType, User,
};
use async_trait::async_trait;
use serde_json::{json, Value};

use super::HotelApi;

/// Canned backend answer.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Rejected(u16, Option<String>),
    Unreachable,
    NotConfigured,
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T, Error> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Rejected(status, message) => Err(Error::Rejected {
                status: *status,
                message: message.clone(),
            }),
            Reply::Unreachable => Err(Error::Network("connection refused".into())),
            Reply::NotConfigured => Err(Error::MissingBackendUrl),
        }
    }
}

#[derive(Debug)]
pub struct FakeHotelApi {
    register: Reply<Value>,
    login: Reply<LoginResponse>,
    search: Reply<Vec<AvailabilityRecord>>,
    list: Reply<Vec<AvailabilityRecord>>,
    calls: Mutex<Calls>,
}

#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub register: Vec<RegisterRequest>,
    pub login: Vec<LoginRequest>,
    pub search: Vec<AvailabilityQuery>,
    pub list: usize,
}

impl Default for FakeHotelApi {
    fn default() -> Self {
        Self {
            register: Reply::Ok(json!({"msg": "user created"})),
            login: Reply::Ok(ana_login()),
            search: Reply::Ok(vec![]),
            list: Reply::Ok(vec![]),
            calls: Mutex::new(Calls::default()),
        }
    }
}

impl FakeHotelApi {
    pub fn with_register(mut self, reply: Reply<Value>) -> Self {
        self.register = reply;
        self
    }

    pub fn with_login(mut self, reply: Reply<LoginResponse>) -> Self {
        self.login = reply;
        self
    }

    pub fn with_search(mut self, reply: Reply<Vec<AvailabilityRecord>>) -> Self {
        self.search = reply;
        self
    }

    pub fn with_list(mut self, reply: Reply<Vec<AvailabilityRecord>>) -> Self {
        self.list = reply;
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.calls().search.len()
    }
}

#[async_trait]
impl HotelApi for FakeHotelApi {
    async fn register(&self, req: &RegisterRequest) -> Result<Value, Error> {
        self.calls.lock().unwrap().register.push(req.clone());
        self.register.to_result()
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, Error> {
        self.calls.lock().unwrap().login.push(req.clone());
        self.login.to_result()
    }

    async fn search_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<AvailabilityRecord>, Error> {
        self.calls.lock().unwrap().search.push(*query);
        self.search.to_result()
    }

    async fn list_availability(&self) -> Result<Vec<AvailabilityRecord>, Error> {
        self.calls.lock().unwrap().list += 1;
        self.list.to_result()
    }
}

pub fn ana() -> User {
    User::new(7, "ana@hotel.es").with_name("Ana", "García")
}

pub fn ana_login() -> LoginResponse {
    LoginResponse {
        token: "jwt-ana".into(),
        user: ana(),
    }
}

/// Doble, Doble, Suite
pub fn doble_suite_records() -> Vec<AvailabilityRecord> {
    let doble = RoomType::new(5, "Doble", 80.0);
    let suite = RoomType::new(9, "Suite", 150.0);
    vec![
        AvailabilityRecord::for_room_type(doble.clone()),
        AvailabilityRecord::for_room_type(doble),
        AvailabilityRecord::for_room_type(suite),
    ]
}
