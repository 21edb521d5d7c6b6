#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use chrono::Utc;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::auth::models::{NewUser, User};
#[cfg(test)]
use crate::features::auth::services::UserRepository;
#[cfg(test)]
use crate::features::routing::models::RouteStep;
#[cfg(test)]
use crate::features::routing::{
    RouteEndpoints, RouteOption, RoutingProvider, StepKind, TravelProfile,
};
#[cfg(test)]
use crate::features::users::models::{NewUserProfile, UserProfile};
#[cfg(test)]
use crate::features::users::services::ProfileRepository;

/// Route alternatives shaped like a directions API answer: "Route 1".."Route n",
/// each departing and arriving
#[cfg(test)]
pub fn sample_routes(n: usize) -> Vec<RouteOption> {
    (0..n)
        .map(|i| {
            let offset = i as f64 * 0.0005;
            RouteOption {
                id: i,
                summary: format!("Route {}", i + 1),
                distance: 250.0 + 50.0 * i as f64,
                duration: 180.0 + 30.0 * i as f64,
                coordinates: vec![
                    [-84.58205, 34.03865],
                    [-84.5828 - offset, 34.0384],
                    [-84.5835, 34.038],
                ],
                steps: Some(vec![
                    RouteStep {
                        kind: StepKind::Depart,
                        instruction: format!("Head north on path {}", i + 1),
                        distance: 250.0 + 50.0 * i as f64,
                        duration: 180.0 + 30.0 * i as f64,
                        name: None,
                    },
                    RouteStep {
                        kind: StepKind::Goal,
                        instruction: "Arrive at your destination".to_string(),
                        distance: 0.0,
                        duration: 0.0,
                        name: None,
                    },
                ]),
            }
        })
        .collect()
}

/// Routing provider that records requests and answers with canned routes
#[cfg(test)]
pub struct StubRoutingProvider {
    routes: Option<Vec<RouteOption>>,
    requests: Mutex<Vec<(RouteEndpoints, TravelProfile)>>,
}

#[cfg(test)]
impl StubRoutingProvider {
    pub fn succeeding(routes: Vec<RouteOption>) -> Self {
        Self {
            routes: Some(routes),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            routes: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<(RouteEndpoints, TravelProfile)> {
        self.requests.lock().unwrap().last().copied()
    }
}

#[cfg(test)]
#[async_trait]
impl RoutingProvider for StubRoutingProvider {
    async fn alternatives(
        &self,
        endpoints: RouteEndpoints,
        profile: TravelProfile,
    ) -> Result<Vec<RouteOption>> {
        self.requests.lock().unwrap().push((endpoints, profile));

        self.routes.clone().ok_or_else(|| {
            AppError::ExternalServiceError("Directions API returned 503".to_string())
        })
    }
}

/// `users` table stand-in with the same unique-email rule
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[cfg(test)]
impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let created = User {
            user_id: users.len() as i32 + 1,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            registration_date: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

/// `user_profiles` table stand-in, upserting by username
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<Vec<UserProfile>>,
}

#[cfg(test)]
impl InMemoryProfileRepository {
    pub fn len(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn upsert(&self, profile: NewUserProfile) -> Result<UserProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        let now = Utc::now();

        if let Some(existing) = profiles.iter_mut().find(|p| p.username == profile.username) {
            existing.email = profile.email;
            existing.high_contrast_mode = profile.high_contrast_mode;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let created = UserProfile {
            id: profiles.len() as i32 + 1,
            username: profile.username,
            email: profile.email,
            high_contrast_mode: profile.high_contrast_mode,
            created_at: now,
            updated_at: now,
        };
        profiles.push(created.clone());
        Ok(created)
    }
}
