//! Sample catalog used to populate a fresh store.
//!
//! Ten listings across ten brands, two accounts, one confirmed viewing and one
//! completed sale.

use super::catalog::{Catalog, IdCounters};
use crate::domain::{
    Account, Appointment, AppointmentStatus, Condition, FuelType, Listing, ListingStatus,
    Transaction, TransactionStatus, Transmission,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap_or_default()
}

fn midnight(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day(year, month, d).and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn unsplash(ids: &[&str]) -> Vec<String> {
    ids.iter()
        .map(|id| format!("https://images.unsplash.com/photo-{id}?q=80&w=2000&auto=format&fit=crop"))
        .collect()
}

struct Seller<'a> {
    id: &'a str,
    name: &'a str,
    phone: &'a str,
    location: &'a str,
}

#[allow(clippy::too_many_arguments)]
fn car(
    n: u32,
    title: &str,
    (brand, model, year): (&str, &str, u16),
    (price, mileage): (u64, u64),
    (fuel_type, transmission, condition): (FuelType, Transmission, Condition),
    description: &str,
    features: &[&str],
    images: &[&str],
    seller: &Seller<'_>,
    listed: DateTime<Utc>,
) -> Listing {
    Listing {
        id: format!("car-{n}"),
        title: title.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage,
        fuel_type,
        transmission,
        description: description.to_string(),
        features: strings(features),
        images: unsplash(images),
        condition,
        seller_id: seller.id.to_string(),
        seller_name: seller.name.to_string(),
        seller_phone: Some(seller.phone.to_string()),
        location: seller.location.to_string(),
        listed,
        status: ListingStatus::Available,
    }
}

/// The ten sample listings, in insertion order `car-1` .. `car-10`.
#[must_use]
pub fn listings() -> Vec<Listing> {
    use Condition::{Excellent, Good};
    use FuelType::{Electric, Gasoline, Hybrid};
    use Transmission::{Automatic, Manual};

    vec![
        car(
            1,
            "Luxury Sedan with Premium Features",
            ("BMW", "5 Series", 2021),
            (45_000, 15_000),
            (Gasoline, Automatic, Excellent),
            "This BMW 5 Series is a stunning luxury sedan in excellent condition. It offers a perfect blend of performance, comfort, and technology, making every drive enjoyable. The car features premium leather seats, advanced driver assistance systems, and a state-of-the-art infotainment system.",
            &["Leather Seats", "Navigation System", "Sunroof", "Bluetooth", "Backup Camera", "Heated Seats"],
            &["1556189250-72ba954cfc2b", "1552519507-da3b142c6e3d", "1605559424843-9e4c228bf1c2"],
            &Seller { id: "user-1", name: "John Smith", phone: "(555) 123-4567", location: "Los Angeles, CA" },
            midnight(2023, 12, 15),
        ),
        car(
            2,
            "Electric SUV with Long Range",
            ("Tesla", "Model Y", 2022),
            (58_000, 8_000),
            (Electric, Automatic, Excellent),
            "This Tesla Model Y is an all-electric SUV with impressive range and performance. It's equipped with Tesla's Autopilot system, making commuting easier. The spacious interior and minimal design create a modern, comfortable space for all passengers.",
            &["Autopilot", "All-Wheel Drive", "Glass Roof", "Premium Audio", "Heated Seats", "360-degree cameras"],
            &["1619623829795-219c8b2df26f", "1617469767053-d3b523a0b982", "1537620618127-55c10b14528a"],
            &Seller { id: "user-2", name: "Emily Jones", phone: "(555) 987-6543", location: "San Francisco, CA" },
            midnight(2024, 1, 10),
        ),
        car(
            3,
            "Sporty Coupe with Low Mileage",
            ("Porsche", "911", 2020),
            (95_000, 12_000),
            (Gasoline, Automatic, Excellent),
            "This Porsche 911 delivers exhilarating performance with its powerful engine and precise handling. The sleek design turns heads wherever you go, while the premium interior provides comfort during every drive. It's been meticulously maintained and is in excellent condition.",
            &["Sport Package", "Leather Interior", "Navigation", "Premium Sound System", "Sport Exhaust", "Carbon Fiber Trim"],
            &["1614162692292-7ac56d7f371e", "1503376780353-7e6692767b70", "1618843479313-40f8afb4b4d8"],
            &Seller { id: "user-3", name: "Michael Brown", phone: "(555) 789-0123", location: "Miami, FL" },
            midnight(2023, 11, 5),
        ),
        car(
            4,
            "Family-Friendly SUV",
            ("Toyota", "Highlander", 2021),
            (38_000, 22_000),
            (Hybrid, Automatic, Good),
            "This Toyota Highlander Hybrid combines space, efficiency, and reliability. It's perfect for family trips with its spacious interior and comfortable seating for seven. The hybrid powertrain delivers excellent fuel economy without sacrificing performance.",
            &["Third Row Seating", "Hybrid Powertrain", "Apple CarPlay", "Android Auto", "Safety Sense Package", "Roof Rails"],
            &["1551830820-330a71b99659", "1533473359331-0135ef1b58bf", "1549317661-bd32c8ce0db2"],
            &Seller { id: "user-4", name: "Sarah Wilson", phone: "(555) 234-5678", location: "Chicago, IL" },
            midnight(2024, 1, 20),
        ),
        car(
            5,
            "Premium Truck with Off-Road Package",
            ("Ford", "F-150 Raptor", 2022),
            (72_000, 9_000),
            (Gasoline, Automatic, Excellent),
            "This Ford F-150 Raptor is ready for any adventure, whether on-road or off-road. It features a powerful engine, specialized suspension, and rugged design. The interior provides luxury comfort with durable materials designed to withstand the elements.",
            &["Off-Road Package", "Fox Shocks", "All-Terrain Tires", "Terrain Management System", "Premium Sound", "360-degree Camera"],
            &["1551830820-330a71b99659", "1609152840889-3a28d768dd5e", "1599912027611-484b9fc447af"],
            &Seller { id: "user-5", name: "James Thompson", phone: "(555) 345-6789", location: "Dallas, TX" },
            midnight(2023, 12, 28),
        ),
        car(
            6,
            "Luxury Convertible",
            ("Mercedes-Benz", "E-Class Cabriolet", 2021),
            (68_000, 11_000),
            (Gasoline, Automatic, Excellent),
            "This Mercedes-Benz E-Class Cabriolet offers the perfect open-air driving experience. With its elegant design and powerful performance, it combines luxury and excitement. The premium interior features high-quality materials and cutting-edge technology.",
            &["Convertible Top", "Heated/Ventilated Seats", "Burmester Sound System", "AIRSCARF", "Driver Assistance Package", "AMG Line Exterior"],
            &["1501066927591-314112b5888e", "1525264626954-d57032431ca5", "1530197553541-ee21bdebb229"],
            &Seller { id: "user-6", name: "Sophia Martinez", phone: "(555) 456-7890", location: "San Diego, CA" },
            midnight(2023, 10, 15),
        ),
        car(
            7,
            "Efficient Compact Car",
            ("Honda", "Civic", 2022),
            (25_000, 18_000),
            (Gasoline, Automatic, Good),
            "This Honda Civic offers excellent fuel efficiency and reliability in a stylish package. The modern interior includes advanced technology features and comfortable seating. It's perfect for city driving and daily commutes.",
            &["Touchscreen Infotainment", "Honda Sensing Suite", "Apple CarPlay", "Android Auto", "Backup Camera", "Keyless Entry"],
            &["1580273916550-e323be2ae537", "1532937522333-68be36e05eda", "1665956346078-f231e9d25ee3"],
            &Seller { id: "user-7", name: "David Johnson", phone: "(555) 567-8901", location: "Seattle, WA" },
            midnight(2024, 1, 5),
        ),
        car(
            8,
            "Rugged Off-Road SUV",
            ("Jeep", "Wrangler", 2020),
            (42_000, 28_000),
            (Gasoline, Manual, Good),
            "This Jeep Wrangler is built for adventure with its rugged design and off-road capabilities. It features removable doors and roof for an open-air experience. The upgraded suspension and tires make it ready for any terrain.",
            &["4x4 System", "Removable Top", "Upgraded Suspension", "Off-Road Tires", "LED Lighting", "Alpine Premium Audio"],
            &["1626096633059-7e871d6b33be", "1578384407072-2ef539eb04dc", "1572850498425-c0bef17c8499"],
            &Seller { id: "user-8", name: "Robert Davis", phone: "(555) 678-9012", location: "Denver, CO" },
            midnight(2023, 11, 20),
        ),
        car(
            9,
            "Classic Muscle Car",
            ("Chevrolet", "Camaro SS", 2019),
            (39_000, 25_000),
            (Gasoline, Manual, Good),
            "This Chevrolet Camaro SS delivers classic American muscle car performance with modern technology. The powerful V8 engine and sport-tuned suspension provide an exhilarating driving experience. The aggressive styling makes a bold statement on the road.",
            &["V8 Engine", "Sport Suspension", "Brembo Brakes", "Performance Exhaust", "Recaro Seats", "Head-Up Display"],
            &["1552519507-da3b142c6e3d", "1594611342073-4bb7683c27ad", "1544830281-1d4d8b8f2cd1"],
            &Seller { id: "user-9", name: "Jennifer Miller", phone: "(555) 789-0123", location: "Atlanta, GA" },
            midnight(2023, 9, 10),
        ),
        car(
            10,
            "Luxury Executive Sedan",
            ("Audi", "A8", 2021),
            (82_000, 14_000),
            (Gasoline, Automatic, Excellent),
            "This Audi A8 represents the pinnacle of luxury sedan engineering. The interior features premium materials and cutting-edge technology for an exceptional driving experience. The powerful engine and advanced suspension system deliver smooth performance on any road.",
            &["Adaptive Air Suspension", "Matrix LED Headlights", "Bang & Olufsen Sound", "Executive Rear Seat Package", "Night Vision Assistant", "Massage Seats"],
            &["1502877338535-766e1452684a", "1606073668584-bbc78964a285", "1518987048-93e29699e79a"],
            &Seller { id: "user-10", name: "William Taylor", phone: "(555) 890-1234", location: "Washington, DC" },
            midnight(2023, 12, 5),
        ),
    ]
}

/// The two sample accounts.
#[must_use]
pub fn accounts() -> Vec<Account> {
    vec![
        Account {
            id: "user-1".to_string(),
            name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            phone: Some("(555) 123-4567".to_string()),
        },
        Account {
            id: "user-2".to_string(),
            name: "Emily Jones".to_string(),
            email: "emily@example.com".to_string(),
            password: "password123".to_string(),
            phone: Some("(555) 987-6543".to_string()),
        },
    ]
}

/// A confirmed viewing of the BMW by Emily.
#[must_use]
pub fn appointments() -> Vec<Appointment> {
    vec![Appointment {
        id: "appointment-1".to_string(),
        listing_id: "car-1".to_string(),
        buyer_id: "user-2".to_string(),
        buyer_name: "Emily Jones".to_string(),
        seller_id: "user-1".to_string(),
        date: day(2024, 3, 15),
        time: "14:00".to_string(),
        status: AppointmentStatus::Confirmed,
        notes: Some("Looking forward to seeing the car".to_string()),
    }]
}

/// John's purchase of the Porsche.
#[must_use]
pub fn transactions() -> Vec<Transaction> {
    vec![Transaction {
        id: "transaction-1".to_string(),
        listing_id: "car-3".to_string(),
        buyer_id: "user-1".to_string(),
        buyer_name: "John Smith".to_string(),
        seller_id: "user-3".to_string(),
        seller_name: "Michael Brown".to_string(),
        price: 95_000,
        date: day(2023, 12, 20),
        status: TransactionStatus::Completed,
    }]
}

/// A complete seeded catalog.
#[must_use]
pub fn catalog() -> Catalog {
    Catalog {
        listings: listings(),
        accounts: accounts(),
        appointments: appointments(),
        transactions: transactions(),
        counters: IdCounters {
            listing: 10,
            appointment: 1,
            account: 2,
        },
    }
}

#[cfg(test)]
pub(crate) fn sample_input() -> crate::domain::NewListing {
    crate::domain::NewListing {
        title: "Weekend Roadster in Great Shape".to_string(),
        brand: "Mazda".to_string(),
        model: "MX-5".to_string(),
        year: Some(2018),
        price: Some(19_500),
        mileage: 31_000,
        fuel_type: FuelType::Gasoline,
        transmission: Transmission::Manual,
        description: "Soft top replaced last year, garage kept, never tracked.".to_string(),
        features: vec!["Soft Top".to_string()],
        images: vec!["https://img.example/mx5.jpg".to_string()],
        condition: Condition::Good,
        seller_id: "user-1".to_string(),
        seller_name: "John Smith".to_string(),
        seller_phone: None,
        location: "Boise, ID".to_string(),
    }
}
