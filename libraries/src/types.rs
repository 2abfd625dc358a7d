use std::fmt;

/// Built-in script classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassKind {
    Game,
    Debug,
    Screen,
    Audio,
    Link,
    ItemClass,
    Item,
    NpcClass,
    Npc,
    Ffc,
    LWpn,
    EWpn,
}

impl ClassKind {
    /// Script-facing type name
    pub fn name(self) -> &'static str {
        match self {
            ClassKind::Game => "game",
            ClassKind::Debug => "debug",
            ClassKind::Screen => "screen",
            ClassKind::Audio => "audio",
            ClassKind::Link => "link",
            ClassKind::ItemClass => "itemdata",
            ClassKind::Item => "item",
            ClassKind::NpcClass => "npcdata",
            ClassKind::Npc => "npc",
            ClassKind::Ffc => "ffc",
            ClassKind::LWpn => "lweapon",
            ClassKind::EWpn => "eweapon",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical type token. Two tokens are the same type iff they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Void,
    Bool,
    Float,
    Class(ClassKind),
}

impl DataType {
    pub const VOID: DataType = DataType::Void;
    pub const BOOL: DataType = DataType::Bool;
    pub const FLOAT: DataType = DataType::Float;
    pub const FFC: DataType = DataType::Class(ClassKind::Ffc);

    /// Storage slots one element of this type occupies. `None` for types
    /// that cannot be stored.
    pub fn element_size(self) -> Option<u16> {
        match self {
            DataType::Void => None,
            DataType::Bool | DataType::Float | DataType::Class(_) => Some(1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Void => "void",
            DataType::Bool => "bool",
            DataType::Float => "float",
            DataType::Class(class) => class.name(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Callable signature as the type-checker sees it.
///
/// `receiver` is the implicit `this` of a method. It is pushed by the caller
/// like any other argument but is not part of `params`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub receiver: Option<ClassKind>,
    pub params: Vec<DataType>,
    pub ret: DataType,
}

impl Signature {
    pub fn method(receiver: ClassKind, ret: DataType, params: &[DataType]) -> Self {
        Self {
            receiver: Some(receiver),
            params: params.to_vec(),
            ret,
        }
    }

    /// Values the callee pops before the return address.
    pub fn stack_arity(&self) -> usize {
        self.params.len() + usize::from(self.receiver.is_some())
    }

    /// `void ChangeFFCScript(ffc this, float)`
    pub fn render(&self, name: &str) -> String {
        let mut args: Vec<String> = Vec::with_capacity(self.stack_arity());
        if let Some(class) = self.receiver {
            args.push(format!("{class} this"));
        }
        args.extend(self.params.iter().map(|p| p.to_string()));
        format!("{} {}({})", self.ret, name, args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_identity() {
        assert_eq!(DataType::FFC, DataType::Class(ClassKind::Ffc));
        assert_ne!(DataType::FFC, DataType::Class(ClassKind::Npc));
        assert_ne!(DataType::BOOL, DataType::FLOAT);
    }

    #[test]
    fn test_element_size() {
        assert_eq!(DataType::Void.element_size(), None);
        assert_eq!(DataType::Float.element_size(), Some(1));
        assert_eq!(DataType::Bool.element_size(), Some(1));
    }

    #[test]
    fn test_render_method_signature() {
        let sig = Signature::method(ClassKind::Ffc, DataType::Void, &[DataType::Float]);
        assert_eq!(sig.render("ChangeFFCScript"), "void ChangeFFCScript(ffc this, float)");
        assert_eq!(sig.stack_arity(), 2);
    }
}
