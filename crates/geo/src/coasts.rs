/// A named reference point on the coastline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeaCoast {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn coast(name: &'static str, lat: f64, lon: f64) -> SeaCoast {
    SeaCoast { name, lat, lon }
}

/// Sea coasts of India, west to east, then the island territories.
pub const SEA_COASTS: [SeaCoast; 28] = [
    coast("Dwarka Coast (Gujarat)", 22.2395, 68.9670),
    coast("Porbandar Coast (Gujarat)", 21.6417, 69.6293),
    coast("Veraval Coast (Gujarat)", 20.9034, 70.3676),
    coast("Mumbai Coast (Maharashtra)", 18.975, 72.825),
    coast("Ratnagiri Coast (Maharashtra)", 16.9902, 73.3120),
    coast("Alibag Coast (Maharashtra)", 18.6414, 72.8724),
    coast("Panaji Coast (Goa)", 15.4909, 73.8278),
    coast("Vasco da Gama Coast (Goa)", 15.3958, 73.8157),
    coast("Mangalore Coast (Karnataka)", 12.9141, 74.8560),
    coast("Karwar Coast (Karnataka)", 14.8136, 74.1297),
    coast("Kochi Coast (Kerala)", 9.9312, 76.2673),
    coast("Thiruvananthapuram Coast (Kerala)", 8.5241, 76.9366),
    coast("Kollam Coast (Kerala)", 8.8932, 76.6141),
    coast("Kozhikode Coast (Kerala)", 11.2588, 75.7804),
    coast("Chennai Coast (Tamil Nadu)", 13.0827, 80.2707),
    coast("Tuticorin Coast (Tamil Nadu)", 8.7642, 78.1348),
    coast("Nagapattinam Coast (Tamil Nadu)", 10.7657, 79.8431),
    coast("Puducherry Coast (Puducherry)", 11.9139, 79.8145),
    coast("Visakhapatnam Coast (Andhra Pradesh)", 17.6868, 83.2185),
    coast("Kakinada Coast (Andhra Pradesh)", 16.9891, 82.2475),
    coast("Nellore Coast (Andhra Pradesh)", 14.4426, 79.9865),
    coast("Puri Coast (Odisha)", 19.8135, 85.8312),
    coast("Paradeep Coast (Odisha)", 20.3167, 86.6100),
    coast("Gopalpur Coast (Odisha)", 19.2686, 84.9126),
    coast("Digha Coast (West Bengal)", 21.6278, 87.5402),
    coast("Port Blair Coast (Andaman and Nicobar Islands)", 11.6234, 92.7265),
    coast("Havelock Island Coast (Andaman and Nicobar Islands)", 12.0246, 93.0113),
    coast("Kavaratti Coast (Lakshadweep Islands)", 10.5667, 72.6369),
];
