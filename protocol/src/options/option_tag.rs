//! DHCP option tags module.
//!
//! The canonical option table. Every tag knows its `OptionKind`, which selects
//! the formatting used by both the encoder and the decoder.

/// The wire representation of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Ipv4,
    Ipv4List,
    Ipv4Pairs,
    U8,
    U16,
    U16List,
    U32,
    I32,
    String,
    Bytes,
    MessageType,
}

/// DHCP options codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionTag {
    /*
    RFC 2132
    */
    // RFC 1497 Vendor Extensions (RFC 2132 §3)
    SubnetMask = 1,
    TimeOffset,
    Routers,
    TimeServers,
    NameServers,
    DomainNameServers,
    LogServers,
    QuotesServers,
    LprServers,
    ImpressServers,
    RlpServers,
    Hostname,
    BootFileSize,
    MeritDumpFile,
    DomainName,
    SwapServer,
    RootPath,
    ExtensionsPath,
    // IP Layer Parameters per Host (RFC 2132 §4)
    ForwardOnOff,
    NonLocalSourceRouteOnOff,
    PolicyFilters,
    MaxDatagramReassemblySize,
    DefaultIpTtl,
    MtuTimeout,
    MtuPlateau,
    // IP Layer Parameters per Interface (RFC 2132 §5)
    MtuInterface,
    MtuSubnet,
    BroadcastAddress,
    MaskRecovery,
    MaskSupplier,
    PerformRouterDiscovery,
    RouterSolicitationAddress,
    StaticRoutes,
    // Link Layer Parameters per Interface (RFC 2132 §6)
    TrailerEncapsulation,
    ArpTimeout,
    EthernetEncapsulation,
    // TCP Default TTL Option (RFC 2132 §7)
    DefaultTcpTtl,
    KeepaliveTime,
    KeepaliveData,
    // Application and Service Parameters (RFC 2132 §8)
    NisDomain,
    NisServers,
    NtpServers,
    VendorSpecific,
    NetbiosNameServers,
    NetbiosDistributionServers,
    NetbiosNodeType,
    NetbiosScope,
    XWindowFontServers,
    XWindowManagerServers,
    // DHCP Extensions (RFC 2132 §9)
    AddressRequest,
    AddressTime,
    Overload,
    DhcpMessageType,
    DhcpServerId,
    ParameterList,
    DhcpMessage,
    DhcpMaxMessageSize,
    RenewalTime,
    RebindingTime,
    ClassId,
    ClientId,
}

impl OptionTag {
    /// Looks the code up in the canonical table.
    ///
    /// Returns `None` for `Pad`, `End` and every code the table does not know.
    pub fn from_code(code: u8) -> Option<Self> {
        use self::OptionTag::*;
        let tag = match code {
            1 => SubnetMask,
            2 => TimeOffset,
            3 => Routers,
            4 => TimeServers,
            5 => NameServers,
            6 => DomainNameServers,
            7 => LogServers,
            8 => QuotesServers,
            9 => LprServers,
            10 => ImpressServers,
            11 => RlpServers,
            12 => Hostname,
            13 => BootFileSize,
            14 => MeritDumpFile,
            15 => DomainName,
            16 => SwapServer,
            17 => RootPath,
            18 => ExtensionsPath,
            19 => ForwardOnOff,
            20 => NonLocalSourceRouteOnOff,
            21 => PolicyFilters,
            22 => MaxDatagramReassemblySize,
            23 => DefaultIpTtl,
            24 => MtuTimeout,
            25 => MtuPlateau,
            26 => MtuInterface,
            27 => MtuSubnet,
            28 => BroadcastAddress,
            29 => MaskRecovery,
            30 => MaskSupplier,
            31 => PerformRouterDiscovery,
            32 => RouterSolicitationAddress,
            33 => StaticRoutes,
            34 => TrailerEncapsulation,
            35 => ArpTimeout,
            36 => EthernetEncapsulation,
            37 => DefaultTcpTtl,
            38 => KeepaliveTime,
            39 => KeepaliveData,
            40 => NisDomain,
            41 => NisServers,
            42 => NtpServers,
            43 => VendorSpecific,
            44 => NetbiosNameServers,
            45 => NetbiosDistributionServers,
            46 => NetbiosNodeType,
            47 => NetbiosScope,
            48 => XWindowFontServers,
            49 => XWindowManagerServers,
            50 => AddressRequest,
            51 => AddressTime,
            52 => Overload,
            53 => DhcpMessageType,
            54 => DhcpServerId,
            55 => ParameterList,
            56 => DhcpMessage,
            57 => DhcpMaxMessageSize,
            58 => RenewalTime,
            59 => RebindingTime,
            60 => ClassId,
            61 => ClientId,

            _ => return None,
        };
        Some(tag)
    }

    /// The option code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The formatting of the option value.
    pub fn kind(self) -> OptionKind {
        use self::OptionTag::*;
        match self {
            SubnetMask | SwapServer | BroadcastAddress | RouterSolicitationAddress
            | AddressRequest | DhcpServerId => OptionKind::Ipv4,

            Routers | TimeServers | NameServers | DomainNameServers | LogServers
            | QuotesServers | LprServers | ImpressServers | RlpServers | NisServers
            | NtpServers | NetbiosNameServers | NetbiosDistributionServers
            | XWindowFontServers | XWindowManagerServers => OptionKind::Ipv4List,

            PolicyFilters | StaticRoutes => OptionKind::Ipv4Pairs,

            ForwardOnOff | NonLocalSourceRouteOnOff | DefaultIpTtl | MtuSubnet | MaskRecovery
            | MaskSupplier | PerformRouterDiscovery | TrailerEncapsulation
            | EthernetEncapsulation | DefaultTcpTtl | KeepaliveData | NetbiosNodeType
            | Overload => OptionKind::U8,

            BootFileSize | MaxDatagramReassemblySize | MtuInterface | DhcpMaxMessageSize => {
                OptionKind::U16
            }

            MtuPlateau => OptionKind::U16List,

            MtuTimeout | ArpTimeout | KeepaliveTime | AddressTime | RenewalTime
            | RebindingTime => OptionKind::U32,

            TimeOffset => OptionKind::I32,

            Hostname | MeritDumpFile | DomainName | RootPath | ExtensionsPath | NisDomain
            | NetbiosScope | DhcpMessage => OptionKind::String,

            VendorSpecific | ParameterList | ClassId | ClientId => OptionKind::Bytes,

            DhcpMessageType => OptionKind::MessageType,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_consistent_with_codes() {
        for code in 0..=255u8 {
            if let Some(tag) = OptionTag::from_code(code) {
                assert_eq!(tag.code(), code);
            }
        }
    }

    #[test]
    fn pad_and_end_are_not_in_the_table() {
        assert!(OptionTag::from_code(0).is_none());
        assert!(OptionTag::from_code(255).is_none());
        assert!(OptionTag::from_code(62).is_none());
    }

    #[test]
    fn kinds_of_the_engine_options() {
        assert_eq!(OptionTag::SubnetMask.kind(), OptionKind::Ipv4);
        assert_eq!(OptionTag::Routers.kind(), OptionKind::Ipv4List);
        assert_eq!(OptionTag::AddressTime.kind(), OptionKind::U32);
        assert_eq!(OptionTag::DhcpMessageType.kind(), OptionKind::MessageType);
        assert_eq!(OptionTag::ClientId.kind(), OptionKind::Bytes);
    }
}
