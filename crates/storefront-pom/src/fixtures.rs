// Fixture data
//
// Canonical inputs shared by every scenario. All records are constants with
// `&'static str` fields: read-only, process-wide, and safe to use from any
// number of concurrently running scenarios.

/// Username/password pair for the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub username: &'static str,
    pub password: &'static str,
}

/// Account accepted by the storefront.
pub const VALID_USER: Credentials = Credentials {
    username: "testuser123",
    password: "testpass123",
};

/// Account the storefront rejects.
pub const INVALID_USER: Credentials = Credentials {
    username: "wronguser",
    password: "wrongpass",
};

/// Blank username and password.
pub const EMPTY_CREDENTIALS: Credentials = Credentials {
    username: "",
    password: "",
};

/// Payload for the place-order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderForm {
    pub name: &'static str,
    pub country: &'static str,
    pub city: &'static str,
    pub credit_card: &'static str,
    pub month: &'static str,
    pub year: &'static str,
}

impl OrderForm {
    /// The six fields in form order.
    pub fn fields(&self) -> [(OrderField, &'static str); 6] {
        [
            (OrderField::Name, self.name),
            (OrderField::Country, self.country),
            (OrderField::City, self.city),
            (OrderField::CreditCard, self.credit_card),
            (OrderField::Month, self.month),
            (OrderField::Year, self.year),
        ]
    }
}

/// One input of the place-order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Name,
    Country,
    City,
    CreditCard,
    Month,
    Year,
}

impl OrderField {
    /// Every field, in the order the form is filled.
    pub const ALL: [OrderField; 6] = [
        OrderField::Name,
        OrderField::Country,
        OrderField::City,
        OrderField::CreditCard,
        OrderField::Month,
        OrderField::Year,
    ];
}

/// A complete, valid order.
pub const ORDER: OrderForm = OrderForm {
    name: "John Doe",
    country: "USA",
    city: "New York",
    credit_card: "1234567890123456",
    month: "12",
    year: "2025",
};

/// Product names exactly as listed on the storefront.
pub mod products {
    pub const SAMSUNG_GALAXY_S6: &str = "Samsung galaxy s6";
    pub const NOKIA_LUMIA_1520: &str = "Nokia lumia 1520";
    pub const NEXUS_6: &str = "Nexus 6";
    pub const SAMSUNG_GALAXY_S7: &str = "Samsung galaxy s7";
    pub const IPHONE_6_32GB: &str = "Iphone 6 32gb";
    pub const SONY_XPERIA_Z5: &str = "Sony xperia z5";

    pub const ALL: [&str; 6] = [
        SAMSUNG_GALAXY_S6,
        NOKIA_LUMIA_1520,
        NEXUS_6,
        SAMSUNG_GALAXY_S7,
        IPHONE_6_32GB,
        SONY_XPERIA_Z5,
    ];
}

/// Category names exactly as listed in the sidebar.
pub mod categories {
    pub const PHONES: &str = "Phones";
    pub const LAPTOPS: &str = "Laptops";
    pub const MONITORS: &str = "Monitors";

    pub const ALL: [&str; 3] = [PHONES, LAPTOPS, MONITORS];

    /// A product the category lists once its filter has applied.
    pub fn sample_product(category: &str) -> Option<&'static str> {
        match category {
            PHONES => Some(super::products::SAMSUNG_GALAXY_S6),
            LAPTOPS => Some("Sony vaio i5"),
            MONITORS => Some("Apple monitor 24"),
            _ => None,
        }
    }
}
