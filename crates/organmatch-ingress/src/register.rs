//! Store-backed intake operations.
//!
//! Each operation validates through the [`IntakeGate`] first, then performs
//! its role check and write inside a single store transaction, so a user
//! deleted concurrently can never end up owning a fresh organ or request.

use organmatch_store::{CreateOrgan, CreateRequest, Directory, DirectoryMut, Store};
use organmatch_types::{
    NewUser, Organ, OrganRequest, OrganmatchError, Result, Role, User, UserId,
};

use crate::gate::{IntakeGate, NewOrgan, NewRequest};

impl IntakeGate {
    /// Register a new donor or recipient.
    ///
    /// # Errors
    /// Validation errors from [`IntakeGate::validate_user`],
    /// [`OrganmatchError::Forbidden`] for the ADMIN role, or
    /// [`OrganmatchError::DuplicateUsername`].
    pub fn register_user<S: Store>(&self, store: &S, input: &NewUser) -> Result<User> {
        if input.role == Role::Admin {
            return Err(OrganmatchError::forbidden(
                "administrators cannot self-register",
            ));
        }
        let fields = self.validate_user(input)?;
        let user = store.transaction(|t| t.create_user(fields))?;
        tracing::info!(
            user = %user.id,
            username = %user.username,
            role = %user.role,
            "User registered"
        );
        Ok(user)
    }

    /// Make sure an administrator named `username` exists. Returns the
    /// existing account when it is already an administrator.
    ///
    /// # Errors
    /// Validation errors from [`IntakeGate::validate_user`], or
    /// [`OrganmatchError::DuplicateUsername`] if a non-admin holds the name.
    pub fn provision_admin<S: Store>(&self, store: &S, username: &str) -> Result<User> {
        let fields = self.validate_user(&NewUser {
            username: username.to_string(),
            name: username.to_string(),
            role: Role::Admin,
            ..NewUser::default()
        })?;
        let (user, created) = store.transaction(|t| {
            match t.find_user_by_username(&fields.username) {
                Some(existing) if existing.is_admin() => Ok((existing, false)),
                Some(existing) => Err(OrganmatchError::DuplicateUsername(existing.username)),
                None => t.create_user(fields).map(|user| (user, true)),
            }
        })?;
        if created {
            tracing::info!(user = %user.id, username = %user.username, "Administrator created");
        }
        Ok(user)
    }

    /// Register an AVAILABLE organ for a donor.
    ///
    /// # Errors
    /// [`OrganmatchError::UserNotFound`] if the donor does not exist,
    /// [`OrganmatchError::Forbidden`] if they are not a DONOR, or a
    /// validation error from [`IntakeGate::validate_organ`].
    pub fn register_organ<S: Store>(
        &self,
        store: &S,
        donor_id: UserId,
        input: &NewOrgan,
    ) -> Result<Organ> {
        let fields = self.validate_organ(input)?;
        let organ = store.transaction(|t| {
            require_role(&t.get_user(donor_id)?, Role::Donor)?;
            t.create_organ(CreateOrgan {
                donor_id,
                organ_type: fields.organ_type,
                blood_group: fields.blood_group,
            })
        })?;
        tracing::info!(
            organ = %organ.id,
            donor = %donor_id,
            organ_type = %organ.organ_type,
            blood_group = %organ.blood_group,
            "Organ registered"
        );
        Ok(organ)
    }

    /// File a PENDING request for a recipient.
    ///
    /// # Errors
    /// [`OrganmatchError::UserNotFound`] if the recipient does not exist,
    /// [`OrganmatchError::Forbidden`] if they are not a RECIPIENT, or a
    /// validation error from [`IntakeGate::validate_request`].
    pub fn file_request<S: Store>(
        &self,
        store: &S,
        recipient_id: UserId,
        input: &NewRequest,
    ) -> Result<OrganRequest> {
        let fields = self.validate_request(input)?;
        let request = store.transaction(|t| {
            require_role(&t.get_user(recipient_id)?, Role::Recipient)?;
            t.create_request(CreateRequest {
                recipient_id,
                organ_type: fields.organ_type,
                blood_group: fields.blood_group,
                urgency_level: fields.urgency_level,
            })
        })?;
        tracing::info!(
            request = %request.id,
            recipient = %recipient_id,
            organ_type = %request.organ_type,
            blood_group = %request.blood_group,
            urgency = %request.urgency_level,
            "Request filed"
        );
        Ok(request)
    }
}

fn require_role(user: &User, role: Role) -> Result<()> {
    if user.role != role {
        return Err(OrganmatchError::forbidden(format!(
            "user {} is {}, not {role}",
            user.id, user.role
        )));
    }
    Ok(())
}
