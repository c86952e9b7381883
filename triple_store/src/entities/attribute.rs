//! Attribute vocabulary - the predicates a contact fact can carry.

/// Namespace every contact attribute is resolved against.
pub const CONTACT_NAMESPACE: &str = "http://hiea.de/contact#";

/// Prefix bound to [`CONTACT_NAMESPACE`] in written files.
pub const CONTACT_PREFIX: &str = "c";

/// The attribute of a fact.
///
/// The vocabulary is fixed but open: local names outside it load as
/// [`Attribute::Custom`] and are written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// The contact's display name. Owning one makes an entity a contact.
    Name,
    Email,
    Phone,
    Birthday,
    GiftIdea,
    Tag,
    /// Any other local name within the contact namespace.
    Custom(String),
}

impl Attribute {
    /// Every attribute of the fixed vocabulary, in display order.
    pub const KNOWN: [Attribute; 6] = [
        Attribute::Name,
        Attribute::Email,
        Attribute::Phone,
        Attribute::Birthday,
        Attribute::GiftIdea,
        Attribute::Tag,
    ];

    /// Local name used on the wire, relative to the contact namespace.
    ///
    /// `Name` is written as `givenName` so files from earlier versions of the
    /// tool keep loading.
    pub fn local_name(&self) -> &str {
        match self {
            Attribute::Name => "givenName",
            Attribute::Email => "email",
            Attribute::Phone => "phone",
            Attribute::Birthday => "birthday",
            Attribute::GiftIdea => "giftIdea",
            Attribute::Tag => "tag",
            Attribute::Custom(local) => local,
        }
    }

    /// Resolve a local name; anything unknown becomes `Custom`.
    pub fn from_local_name(local: &str) -> Self {
        match local {
            "givenName" => Attribute::Name,
            "email" => Attribute::Email,
            "phone" => Attribute::Phone,
            "birthday" => Attribute::Birthday,
            "giftIdea" => Attribute::GiftIdea,
            "tag" => Attribute::Tag,
            other => Attribute::Custom(other.to_string()),
        }
    }

    /// Parse a user-facing attribute keyword such as `email` or `gift`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "name" | "givenName" => Some(Attribute::Name),
            "email" => Some(Attribute::Email),
            "phone" => Some(Attribute::Phone),
            "birthday" => Some(Attribute::Birthday),
            "gift" | "giftIdea" => Some(Attribute::GiftIdea),
            "tag" => Some(Attribute::Tag),
            _ => None,
        }
    }

    /// Whether an entity may carry several facts with this attribute.
    ///
    /// Not enforced by the store; callers check before inserting.
    pub fn is_multi_valued(&self) -> bool {
        !matches!(self, Attribute::Name | Attribute::Birthday)
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Attribute::Name => "name",
            Attribute::GiftIdea => "gift",
            other => other.local_name(),
        };
        write!(f, "{}", label)
    }
}
