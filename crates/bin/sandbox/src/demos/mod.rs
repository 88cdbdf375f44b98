//! Small scenes exercising the reflection runtime, printed through the log.

pub mod debug;
pub mod invoke;
pub mod proxy;
pub mod registry;

use mirror_reflect::{inherits, reflect, Reflect};

#[derive(Clone, Reflect)]
#[reflect(Clone)]
pub struct Transform {
    pub position: [f32; 3],
    #[reflect(property("Scale"))]
    pub scale: f32,
}

pub struct Entity {
    pub name: String,
    pub transform: Transform,
}

pub struct Player {
    pub entity: Entity,
    pub health: u32,
}

inherits!(Player => entity: Entity);

impl Entity {
    fn get_name(&self) -> &String {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Player {
    fn damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    fn heal(&mut self, amount: u32) -> u32 {
        self.health += amount;
        self.health
    }

    fn heal_capped(&mut self, amount: u32, cap: u32) -> u32 {
        self.health = (self.health + amount).min(cap);
        self.health
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }
}

reflect! {
    type(Entity),
    field(transform),
    func(fn get_name(&self) -> &String, property()),
    func(fn set_name(&mut self, name: String), property()),

    type(Player, bases<Entity>),
    field(health),
    func(fn damage(&mut self, amount: u32) -> u32),
    func(fn heal(&mut self, amount: u32) -> u32),
    func(fn heal(&mut self, amount: u32, cap: u32) -> u32 = Player::heal_capped),
    func(fn is_alive(&self) -> bool, property("Alive")),
}

pub fn player() -> Player {
    Player {
        entity: Entity {
            name: String::from("hero"),
            transform: Transform {
                position: [0.0, 1.0, 0.0],
                scale: 1.0,
            },
        },
        health: 100,
    }
}
